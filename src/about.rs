pub const MACHAON_CLIENT_DISPLAY_VERSION: &str = env!("MACHAON_CLIENT_DISPLAY_VERSION");
pub const MACHAON_CLIENT_BUILD_N: &str = env!("MACHAON_CLIENT_BUILD_N");

pub fn version_cli_text() -> String {
    format!(
        "machaon-client {}\nBuild {}\nRequest composer for the MachaonWeb structure comparison service",
        MACHAON_CLIENT_DISPLAY_VERSION, MACHAON_CLIENT_BUILD_N
    )
}
