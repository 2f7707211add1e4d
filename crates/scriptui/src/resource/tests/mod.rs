//! Cross-module tests for handles, proxies and collection

mod proxy_resolution;
