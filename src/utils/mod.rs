/// 错误响应中的业务错误码
pub mod error_codes {
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const NOT_FOUND: i32 = 1004;
    pub const STORE_UNAVAILABLE: i32 = 5001;
    pub const DECODE_ERROR: i32 = 5002;
}
