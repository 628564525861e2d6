mod test_utils;

pub use test_utils::{
    MockBuildServer, create_test_config, init_tracing, status_document,
};
