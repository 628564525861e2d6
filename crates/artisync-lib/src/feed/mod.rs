mod extract;
mod fetch;

pub use extract::{
    BUILD_ELEMENT, URL_ELEMENT, extract_last_successful_build_url,
    parse_last_successful_build_url,
};
pub use fetch::fetch_status_document;
