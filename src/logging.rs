pub fn init_tool_logging() {
    env_logger::builder()
        .filter_level(
            if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            }
        )
        .parse_default_env()
        .init()
}
