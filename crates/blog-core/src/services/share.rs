use crate::domain::Post;
use crate::ports::{MailTransport, OutgoingMail};

/// Cleaned share-form input.
#[derive(Debug, Clone)]
pub struct ShareRequest {
    /// Name of the reader recommending the post.
    pub name: String,
    /// Reader's own address.
    pub email: String,
    /// Recipient address.
    pub to: String,
    pub comments: Option<String>,
}

/// Build the recommendation email for `post`.
pub fn compose_share_mail(request: &ShareRequest, post: &Post, url: &str, sender: &str) -> OutgoingMail {
    let subject = format!("{} recommends you read {}", request.name, post.title);

    let mut body = format!("Read {} at {}\n\n", post.title, url);
    if let Some(comments) = request.comments.as_deref().filter(|c| !c.trim().is_empty()) {
        body.push_str(&format!("{}'s comments: {}", request.name, comments));
    }

    OutgoingMail {
        subject,
        body,
        from: sender.to_string(),
        to: vec![request.to.clone()],
    }
}

/// Send the recommendation email. Returns true iff the transport accepted
/// exactly one message; failures are logged, never propagated.
pub async fn send_share_post_email(
    transport: &dyn MailTransport,
    sender: &str,
    request: &ShareRequest,
    url: &str,
    post: &Post,
) -> bool {
    let mail = compose_share_mail(request, post, url, sender);

    match transport.send(&mail).await {
        Ok(accepted) => {
            tracing::info!(post_id = %post.id, accepted, "Share email handed to transport");
            accepted == 1
        }
        Err(e) => {
            tracing::warn!(post_id = %post.id, error = %e, "Failed to send share email");
            false
        }
    }
}
