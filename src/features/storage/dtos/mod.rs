mod storage_dto;

pub use storage_dto::{
    ext_from_content_type, CompleteQuery, CompleteResponseDto, CompleteUploadDto,
    ListStorageQuery, ListStorageResponseDto, PresignDownloadQuery, PresignDownloadResponseDto,
    PresignUploadDto, PresignUploadResponseDto, StorageObjectDto,
};
