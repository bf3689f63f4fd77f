//! Application state - shared across all handlers.

use std::sync::Arc;

use tera::Tera;

use blog_core::ports::{CommentRepository, MailTransport, PostRepository, TagRepository};
use blog_infra::{ConsoleMailTransport, InMemoryBlogStore};

#[cfg(feature = "postgres")]
use blog_infra::{PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository};

#[cfg(feature = "smtp")]
use blog_infra::SmtpMailTransport;

use crate::config::{AppConfig, MailConfig};
use crate::templates::load_templates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub mailer: Arc<dyn MailTransport>,
    pub templates: Arc<Tera>,
    /// `From` address of share emails.
    pub sender: String,
    /// Name of the storage backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, tera::Error> {
        let templates = Arc::new(load_templates(&config.template_dir)?);
        let mailer = build_mailer(&config.mail);

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match blog_infra::database::connect(db_config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Ok(Self {
                        posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                        tags: Arc::new(PostgresTagRepository::new(conn.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(conn)),
                        mailer,
                        templates,
                        sender: config.mail.sender.clone(),
                        storage: "postgres",
                    });
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory store");

        tracing::info!("Application state initialized (memory)");

        Ok(Self::in_memory(
            Arc::new(InMemoryBlogStore::new()),
            mailer,
            templates,
            config.mail.sender.clone(),
        ))
    }

    /// State backed by a single in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryBlogStore>,
        mailer: Arc<dyn MailTransport>,
        templates: Arc<Tera>,
        sender: String,
    ) -> Self {
        Self {
            posts: store.clone(),
            tags: store.clone(),
            comments: store,
            mailer,
            templates,
            sender,
            storage: "memory",
        }
    }
}

fn build_mailer(config: &MailConfig) -> Arc<dyn MailTransport> {
    #[cfg(feature = "smtp")]
    if let Some(smtp) = &config.smtp {
        match SmtpMailTransport::new(smtp) {
            Ok(transport) => return Arc::new(transport),
            Err(e) => tracing::error!("Failed to configure SMTP: {}. Using console transport.", e),
        }
    }

    #[cfg(not(feature = "smtp"))]
    if config.smtp.is_some() {
        tracing::warn!("SMTP_HOST set but the smtp feature is disabled. Using console transport.");
    }

    Arc::new(ConsoleMailTransport)
}
