/// Middleware modules for the API server
///
/// - `tracking`: execution time logging for admin endpoints

pub mod tracking;
