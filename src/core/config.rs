use crate::core::error::{Error, Result};
use crate::schema::schema::SchemaRegistry;

#[derive(Debug, Clone)]
pub struct Config {
    pub batch_size: usize,             // Insertions between yields in insert_batch
    pub analyzer: String,              // Analyzer applied to every string field
    pub max_token_length: usize,       // Longer tokens are dropped by the tokenizer
    pub id_generation_attempts: usize, // Random id retries before giving up
}

impl Default for Config {
    fn default() -> Self {
        Config {
            batch_size: 1000,
            analyzer: "standard".to_string(),
            max_token_length: 255,
            id_generation_attempts: 8,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be positive".to_string()));
        }
        if self.max_token_length == 0 {
            return Err(Error::InvalidConfig("max_token_length must be positive".to_string()));
        }
        if self.id_generation_attempts == 0 {
            return Err(Error::InvalidConfig(
                "id_generation_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything needed to create a database instance.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub schema: SchemaRegistry,
    pub config: Config,
}

impl DatabaseConfig {
    pub fn new(schema: SchemaRegistry) -> Self {
        DatabaseConfig {
            schema,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}
