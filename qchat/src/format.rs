//! Assistant-visible rendering of gateway results and turn failures.
//!
//! ```rust
//! use qchat::success_message;
//! use qgateway::{GatewayResponse, Route};
//!
//! let routed = GatewayResponse::new(
//!     "- follow up with Sam",
//!     Route::new(Some("Work".into()), Some("Meetings".into())),
//! );
//! assert!(success_message(&routed).ends_with("📝 **Location**: Work → Meetings"));
//!
//! let unrouted = GatewayResponse::new("Got it", Route::unrouted());
//! assert!(!success_message(&unrouted).contains("Location"));
//! ```

use qgateway::GatewayResponse;

use crate::ChatError;

pub const SUCCESS_PREAMBLE: &str = "✅ **Content processed and added to your notes**";
pub const FAILURE_PREFIX: &str = "❌ Sorry, I encountered an error:";

pub fn success_message(response: &GatewayResponse) -> String {
    let mut content = format!("{SUCCESS_PREAMBLE}\n\n{}", response.summary);

    if let Some((notebook, section)) = response.route.location() {
        content.push_str(&format!("\n\n📝 **Location**: {notebook} → {section}"));
    }

    content
}

pub fn failure_message(error: &ChatError) -> String {
    format!("{FAILURE_PREFIX} {}", error.message)
}

#[cfg(test)]
mod tests {
    use qgateway::Route;

    use super::*;

    #[test]
    fn success_message_needs_both_route_parts_for_location() {
        let half = GatewayResponse::new("Filed", Route::new(Some("Work".into()), None));

        assert_eq!(
            success_message(&half),
            "✅ **Content processed and added to your notes**\n\nFiled"
        );
    }

    #[test]
    fn failure_message_carries_error_text() {
        let error = ChatError::network("timeout of 30000ms exceeded");

        assert_eq!(
            failure_message(&error),
            "❌ Sorry, I encountered an error: timeout of 30000ms exceeded"
        );
    }
}
