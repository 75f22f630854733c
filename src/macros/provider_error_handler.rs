/// unwrap a provider result or log the error and answer with a 500
macro_rules! provider_handle_error_http {
    ( $data:expr, $target:expr, $type_str:expr) => {
        match $data {
            Ok(e) => e,
            Err(error) => {
                error!(target:$target, "Error getting {}. (error: {})", $type_str, error);
                return Err(Status::InternalServerError);
            }
        }
    }
}

pub(crate) use provider_handle_error_http;
