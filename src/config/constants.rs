//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Catalog pagination
// =============================================================================

/// Number of products returned per catalog page
pub const RESULTS_PER_PAGE: i64 = 9;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Name of the HTTP-only cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Random bytes drawn for a password reset token
pub const RESET_TOKEN_BYTES: usize = 20;

/// Password reset token lifetime in minutes
pub const RESET_TOKEN_TTL_MINUTES: i64 = 15;

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default externally reachable base URL (password reset links)
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

// =============================================================================
// Database
// =============================================================================

/// Default MongoDB connection URI (for development)
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";

/// Default database name
pub const DEFAULT_DATABASE_NAME: &str = "trugoods";

/// Collection holding user accounts
pub const COLLECTION_USERS: &str = "users";

/// Collection holding catalog products
pub const COLLECTION_PRODUCTS: &str = "products";

/// Collection holding orders
pub const COLLECTION_ORDERS: &str = "orders";

// =============================================================================
// Media
// =============================================================================

/// Storage folder for user avatars
pub const AVATAR_FOLDER: &str = "avatars";

/// Pixel width avatars are scaled to on upload
pub const AVATAR_WIDTH: u32 = 150;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Lowest accepted product rating
pub const MIN_RATING: f64 = 1.0;

/// Highest accepted product rating
pub const MAX_RATING: f64 = 5.0;
