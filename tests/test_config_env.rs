//! Kept in its own test binary: it mutates the process environment, which
//! clap reads while parsing every `ServerArgs`.

use chlp::config::{ServerArgs, ServerConfig};
use clap::Parser;

#[test]
fn test_config_path_from_env() {
    let path = std::env::temp_dir().join(format!("chlp-env-{}.yaml", std::process::id()));
    std::fs::write(&path, "port: 5000\nindex_file: home.txt\n").unwrap();

    unsafe {
        std::env::set_var("CHLP_CONFIG", &path);
    }
    let args = ServerArgs::try_parse_from(["chlp-server"]).unwrap();
    let cfg = ServerConfig::load(args).unwrap();
    unsafe {
        std::env::remove_var("CHLP_CONFIG");
    }

    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.index_file, "home.txt");
}
