mod static_token;
mod token_file;

pub use static_token::StaticCredentialProvider;
pub use token_file::TokenFileCredentialProvider;
