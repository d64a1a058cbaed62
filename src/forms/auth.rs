use serde::Deserialize;

#[derive(Debug, Deserialize)]
/// Login payload. The original front end posts `user` and `password`.
pub struct LoginForm {
    #[serde(default, alias = "user")]
    pub identifier: String,
    #[serde(default, alias = "password")]
    pub secret: String,
}
