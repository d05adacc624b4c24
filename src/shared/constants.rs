// =============================================================================
// PHOTO LISTING
// =============================================================================

/// Default number of photos per listing page (bounds live on the query DTO)
pub const DEFAULT_TAKE: i64 = 25;

// =============================================================================
// PRESIGNED URLS
// =============================================================================

/// Default presigned URL lifetime in seconds
pub const DEFAULT_PRESIGN_TTL: u32 = 300;

/// Maximum number of signing calls in flight when enriching a page
pub const PRESIGN_CONCURRENCY: usize = 8;

// =============================================================================
// COMMENTS
// =============================================================================

/// Maximum comment body length after trimming
pub const MAX_COMMENT_LENGTH: u64 = 2000;

/// Comments returned per photo
pub const COMMENT_PAGE_SIZE: i64 = 100;

// =============================================================================
// STORAGE BROWSER
// =============================================================================

/// Default number of objects per storage listing page
pub const DEFAULT_LIST_LIMIT: i64 = 100;
