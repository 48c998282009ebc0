pub mod schema;
pub mod validator;
