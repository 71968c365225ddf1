use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use thiserror::Error;
use toml_edit::{value, DocumentMut};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml_edit::TomlError),
    #[error("invalid config values: {0}")]
    Deserialize(#[from] toml::de::Error),
}

trait ConfigSerializeDefault {
    fn fix_config(self, name: &str, doc: &mut DocumentMut);
}

macro_rules! impl_simple_default {
    ( $( $type:ty ),* ) => {
        $(
            impl ConfigSerializeDefault for $type {
                fn fix_config(self, name: &str, doc: &mut DocumentMut) {
                    doc.entry(name).or_insert_with(|| value(self));
                }
            }
        )*
    }
}

impl_simple_default!(String, i64, bool);

macro_rules! gen_config {
    (
        $( $name:ident: $type:ty = $default:expr),*
    ) => {
        #[derive(Serialize, Deserialize)]
        pub struct ChatConfig {
            $(
                pub $name: $type,
            )*
        }

        impl Default for ChatConfig {
            fn default() -> ChatConfig {
                ChatConfig {
                    $(
                        $name: $default,
                    )*
                }
            }
        }

        impl ChatConfig {
            /// Loads the config, filling in defaults for any missing keys
            /// and writing them back so the file stays complete. A missing
            /// file yields the defaults.
            pub fn load(config_file: &str) -> Result<ChatConfig, ConfigError> {
                let str = fs::read_to_string(config_file).unwrap_or_default();
                let mut doc = str.parse::<DocumentMut>()?;

                $(
                    <$type as ConfigSerializeDefault>::fix_config($default, stringify!($name), &mut doc);
                )*

                let patched = doc.to_string();
                if str != patched {
                    let mut file = fs::OpenOptions::new()
                        .create(true)
                        .write(true)
                        .open(config_file)?;
                    write!(file, "{}", patched)?;
                }

                Ok(toml::from_str(&patched)?)
            }
        }
    };
}

gen_config! {
    chat_format: String = "{name}: {message}".to_string(),
    all_tag: String = "[ALL]".to_string(),
    red_tag: String = "[RED]".to_string(),
    blue_tag: String = "[BLUE]".to_string(),
    spectator_tag: String = "[SPEC]".to_string(),
    dead_tag: String = "[DEAD]".to_string()
}
