use cbindgen::Config;
use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/c_list.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    // 头文件放在 target/debug 或 target/release 下，与生成的库文件同目录
    let out_dir = if cfg!(debug_assertions) {
        PathBuf::from(env::var("CARGO_TARGET_DIR").unwrap_or_else(|_| "target".into()))
            .join("debug")
    } else {
        PathBuf::from(env::var("CARGO_TARGET_DIR").unwrap_or_else(|_| "target".into()))
            .join("release")
    };

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=找不到 CARGO_MANIFEST_DIR: {e}");
            return;
        }
    };

    let config = match Config::from_file(crate_dir.join("cbindgen.toml")) {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("cargo:warning=无法加载 cbindgen.toml: {e}");
            return;
        }
    };

    // 头文件生成失败不影响库本身的构建
    match cbindgen::generate_with_config(&crate_dir, config) {
        Ok(bindings) => {
            let header = crate_dir.join(&out_dir).join("ring_list.h");
            if let Some(parent) = header.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    println!("cargo:warning=无法创建输出目录 {}: {e}", parent.display());
                    return;
                }
            }
            bindings.write_to_file(&header);
        }
        Err(e) => {
            println!("cargo:warning=生成 C 头文件失败: {e:?}");
        }
    }
}
