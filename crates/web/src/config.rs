use serde::Deserialize;

#[derive(Clone, Deserialize)]
pub struct Config {
    pub web: Web,
    pub database: Database,
    #[serde(default)]
    pub uploads: Uploads,
}

#[derive(Clone, Deserialize)]
pub struct Web {
    pub domain: String,
    pub port: u16,
    #[serde(default = "host_default")]
    pub host: String,
}

#[derive(Clone, Deserialize)]
pub struct Database {
    pub uri: String,
}

#[derive(Clone, Deserialize)]
pub struct Uploads {
    #[serde(default = "uploads_dir_default")]
    pub dir: String,
}

impl Default for Uploads {
    fn default() -> Self {
        Uploads {
            dir: uploads_dir_default(),
        }
    }
}

fn host_default() -> String {
    String::from("0.0.0.0")
}

fn uploads_dir_default() -> String {
    String::from("uploads")
}
