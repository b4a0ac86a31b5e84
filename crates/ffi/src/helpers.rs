use crate::error::{with_last_error_mut, CarbonStockError, CarbonStockErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `CarbonStockError` trait.
pub(crate) fn set_last_error(error: &impl CarbonStockError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl CarbonStockError) -> CarbonStockErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the outcome of a fallible boundary step.
/// Success clears the slot so a stale message never outlives its call.
pub(crate) fn track_result<T, E: CarbonStockError>(
    result: Result<T, E>,
) -> Result<T, CarbonStockErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = CarbonStockErrorCode::Ok;
    });
}
