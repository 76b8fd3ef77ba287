// src/templates.rs
use askama::Template;

// Struct para o template `login.html` (ficheiro em templates/)
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    // Campo opcional para passar uma mensagem de erro para o template
    pub error: Option<String>,
}

// Shell da aplicação (o resto da UI fala com a API JSON)
#[derive(Template)]
#[template(path = "index.html")]
pub struct AppPage {
    pub user_name: String,
    pub is_admin: bool,
}
