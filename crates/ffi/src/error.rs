use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait CarbonStockError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> CarbonStockErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `CarbonStockError` for the boundary checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultCarbonStockError {
    code: CarbonStockErrorCode,
    msg: String,
}

impl DefaultCarbonStockError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"input"`, `"out_record"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: CarbonStockErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a selector discriminant outside its enum.
    ///
    /// # Arguments
    /// * `selector` - The C enum the value was meant to be (e.g., `"CarbonForestType"`)
    /// * `raw` - The discriminant received
    pub fn invalid_selector(selector: &str, raw: i32) -> Self {
        Self {
            code: CarbonStockErrorCode::InvalidSelector,
            msg: format!("{raw} is not a valid {selector} value"),
        }
    }

    /// Create error for a numeric parameter that must be finite.
    ///
    /// # Arguments
    /// * `param_name` - The name of the invalid parameter (e.g., `"diameter_cm"`, `"forest_area"`)
    /// * `value` - The invalid value
    pub fn non_finite(param_name: &str, value: f64) -> Self {
        Self {
            code: CarbonStockErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' must be finite, got {value}"),
        }
    }
}

impl CarbonStockError for DefaultCarbonStockError {
    fn code(&self) -> CarbonStockErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by carbon stock functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarbonStockErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// A category, bamboo, forest or mangrove discriminant is out of range.
    InvalidSelector = 2,

    /// Invalid numeric parameter (`NaN` or infinite).
    InvalidParameter = 3,
}

impl From<DefaultCarbonStockError> for CarbonStockErrorCode {
    fn from(error: DefaultCarbonStockError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is owned here so the pointer handed out stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, CarbonStockErrorCode)> =
        const { RefCell::new((None, CarbonStockErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, CarbonStockErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, CarbonStockErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if the last call on this thread failed.
/// - `null` if the last call succeeded or the message cannot be converted to a C string.
///
/// # Thread Safety
/// Error messages are stored per-thread, so each thread sees only its own failures.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// CarbonRecord record;
/// CarbonStockErrorCode err = carbon_stock_compile_record(&input, NULL, &record);
/// if (err != Ok) {
///     const char* error = carbon_stock_get_last_error();
///     if (error) {
///         printf("Compile failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn carbon_stock_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns `Ok` (0) if the last call on this thread succeeded.
#[no_mangle]
pub extern "C" fn carbon_stock_get_last_error_code() -> CarbonStockErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
