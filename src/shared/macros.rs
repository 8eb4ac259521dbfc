/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a `Result` in the binary's start-up path, logging and exiting on `Err`.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr, $context:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("{}: {}", $context, e);
                std::process::exit(1);
            }
        }
    };
    ($expr:expr) => {
        $crate::unwrap_or_exit!($expr, "fatal error")
    };
}
