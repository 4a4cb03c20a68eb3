use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE_NAME, generate_config_template};
use crate::fs::{FileSystem, default_fs};
use crate::style;

pub fn cmd_init(args: InitArgs) -> i32 {
    cmd_init_with_fs(args, default_fs())
}

pub fn cmd_init_with_fs(args: InitArgs, fs: &dyn FileSystem) -> i32 {
    let config_path = args.path.join(CONFIG_FILE_NAME);
    match fs.create_new(&config_path, &generate_config_template()) {
        Ok(true) => {}
        Ok(false) => {
            style::error(&format!(
                "{} already exists at {}",
                CONFIG_FILE_NAME,
                style::path(&config_path)
            ));
            return 1;
        }
        Err(e) => {
            style::error(&e.to_string());
            return 1;
        }
    }

    style::success(&format!(
        "Created {} at {}",
        CONFIG_FILE_NAME,
        style::path(&config_path)
    ));
    style::hint("uncomment the [layers] tables to enforce a layering policy");
    0
}
