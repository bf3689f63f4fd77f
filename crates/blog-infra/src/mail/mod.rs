//! Mail transports - SMTP delivery plus console and in-memory fallbacks.

mod console;
mod memory;

#[cfg(feature = "smtp")]
mod smtp;

pub use console::ConsoleMailTransport;
pub use memory::InMemoryMailbox;

#[cfg(feature = "smtp")]
pub use smtp::SmtpMailTransport;

/// SMTP relay configuration.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Mask an address for logging, e.g. `g***@example.com`.
pub(crate) fn mask_address(address: &str) -> String {
    match address.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::mask_address;

    #[test]
    fn test_mask_address() {
        assert_eq!(mask_address("grace@example.com"), "g***@example.com");
        assert_eq!(mask_address("g@example.com"), "***@example.com");
        assert_eq!(mask_address("nonsense"), "***");
    }
}
