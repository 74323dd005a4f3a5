//! Logging macros taking a `Code` plus `"key" => value` context pairs

/// Log an error with a code; context values may be any `Display` type
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::error($code, $message),
            vec![],
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::error($code, $message),
                context_strings,
            )
        }
    };
}

/// Log a success event with a code
#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::success($code, $message),
            vec![],
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::success($code, $message),
                context_strings,
            )
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_with_context($crate::logging::LogEvent::info($message), vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::info($message),
                context_strings,
            )
        }
    };
}

/// Log a warning; the code form is `log_warning!(code = CODE, "message", ...)`
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr) => {
        $crate::logging::log_with_context(
            $crate::logging::LogEvent::warning_with_code($code, $message),
            vec![],
        )
    };

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::warning_with_code($code, $message),
                context_strings,
            )
        }
    };

    ($message:expr) => {
        $crate::logging::log_with_context($crate::logging::LogEvent::warning($message), vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::warning($message),
                context_strings,
            )
        }
    };
}

/// Debug events are only built when the configured level admits them
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::logging::log_with_context($crate::logging::LogEvent::debug($message), vec![])
        }
    };

    ($message:expr, $($key:expr => $value:expr),+ $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            $crate::logging::log_with_context(
                $crate::logging::LogEvent::debug($message),
                context_strings,
            )
        }
    };
}

/// Success event with a `duration_ms` field
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0)
        )
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0),
            $($key => $value),+
        )
    };
}
