/// Time a block and report the duration at debug level.
///
/// `profile!("name", expr)` logs under the `profile` target;
/// `profile!(scope: "physics", level: DEBUG, "name", expr)` goes through the scoped config.
#[macro_export]
macro_rules! profile {
    (scope: $scope:expr, level: $level:ident, $description:expr, $block:expr) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration = start.elapsed();
        $crate::scoped_log!($level, $scope, "[{}]: Time elapsed: {:?}", $description, duration);
        result
    }};
    ($description:expr, $block:expr) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration = start.elapsed();
        $crate::logging::tracing::debug!(
            target: "profile",
            "[{}]: Time elapsed: {:?}",
            $description,
            duration
        );
        result
    }};
}
