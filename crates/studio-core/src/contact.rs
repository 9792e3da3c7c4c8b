#![forbid(unsafe_code)]

//! Contact form redirect.
//!
//! Submitting the contact form never reaches a server. The fields are folded
//! into a greeting message and handed to a messaging deep link opened in a new
//! browsing context, after which the form is reset. Nothing is validated:
//! empty fields are sent as empty.
//!
//! The message is percent-encoded as a whole, so user input containing `&`,
//! `#`, `%` or line breaks cannot truncate or corrupt the outgoing text.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::config::ContactConfig;
use crate::page::{ElementId, EventKind, Page, PageError, PageResult, Target};

pub const FORM: &str = ".contact-form";

/// Field ids, in the order they are read.
pub const FIELD_IDS: [&str; 5] = ["name", "email", "phone", "service", "message"];

/// Unreserved characters (RFC 3986) stay literal; everything else is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The submitted form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
}

impl Enquiry {
    /// Plain-text message addressed to `business`.
    pub fn message(&self, business: &str) -> String {
        format!(
            "Hello {business},\n\nI would like to enquire about *{service}*.\n\n\
             *Name:* {name}\n*Email:* {email}\n*Phone:* {phone}\n*Message:* {message}",
            service = self.service,
            name = self.name,
            email = self.email,
            phone = self.phone,
            message = self.message,
        )
    }

    /// Deep link carrying this enquiry as its `text` parameter.
    pub fn deep_link(&self, config: &ContactConfig) -> Result<Url, url::ParseError> {
        let mut link = Url::parse(&format!("https://{}/", config.host))?;
        link.set_path(&config.phone);
        let message = self.message(&config.business_name);
        let text = utf8_percent_encode(&message, QUERY_VALUE);
        link.set_query(Some(&format!("text={text}")));
        Ok(link)
    }
}

/// Intercepts the contact form and redirects it to the messaging app.
#[derive(Debug, Clone)]
pub struct ContactRedirector {
    form: ElementId,
    fields: [Option<ElementId>; 5],
    config: ContactConfig,
}

impl ContactRedirector {
    /// Requires the contact form. Missing fields read as empty.
    pub fn mount(page: &mut dyn Page, config: &ContactConfig) -> PageResult<Option<Self>> {
        let Some(form) = page.query(FORM) else {
            return Ok(None);
        };
        let fields = FIELD_IDS.map(|id| page.element_by_id(id));
        page.listen(
            Target::Element(form),
            EventKind::Submit {
                prevent_default: true,
            },
        )?;
        Ok(Some(Self {
            form,
            fields,
            config: config.clone(),
        }))
    }

    /// Current form contents.
    pub fn read(&self, page: &dyn Page) -> Enquiry {
        let [name, email, phone, service, message] =
            self.fields.map(|field| field.map(|el| page.field_value(el)).unwrap_or_default());
        Enquiry {
            name,
            email,
            phone,
            service,
            message,
        }
    }

    /// Handle a submission. Returns `false` for other forms.
    ///
    /// The form is reset even when the link cannot be built or the host
    /// refuses to open it.
    pub fn on_submit(&self, page: &mut dyn Page, form: ElementId) -> PageResult<bool> {
        if form != self.form {
            return Ok(false);
        }
        let link = self.read(page).deep_link(&self.config);
        let opened = link
            .map_err(|e| PageError::Host(format!("contact link: {e}")))
            .and_then(|link| page.open_in_new_context(link.as_str()));
        page.reset_form(self.form)?;
        if opened? {
            crate::info!(host = %self.config.host, "enquiry handed to messaging app");
        } else {
            crate::warn!("new browsing context was blocked");
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn enquiry() -> Enquiry {
        Enquiry {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "98765".into(),
            service: "Wedding".into(),
            message: "Hi".into(),
        }
    }

    #[test]
    fn message_template() {
        assert_eq!(
            enquiry().message("Pavani Studios"),
            "Hello Pavani Studios,\n\nI would like to enquire about *Wedding*.\n\n\
             *Name:* Asha\n*Email:* asha@example.com\n*Phone:* 98765\n*Message:* Hi"
        );
    }

    #[test]
    fn deep_link_encodes_line_breaks() {
        let link = enquiry().deep_link(&ContactConfig::default()).unwrap();
        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/918341847112");
        let query = link.query().unwrap();
        assert!(query.starts_with("text=Hello%20Pavani%20Studios%2C%0A%0AI%20would"));
        assert!(query.contains("%2AName%3A%2A%20Asha%0A"));
    }

    #[test]
    fn deep_link_escapes_field_values() {
        let mut e = enquiry();
        e.message = "rates & dates?#50% off".into();
        let link = e.deep_link(&ContactConfig::default()).unwrap();
        let query = link.query().unwrap();
        assert!(query.ends_with("rates%20%26%20dates%3F%2350%25%20off"));
        let decoded: Vec<_> = link.query_pairs().collect();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].0, "text");
        assert!(decoded[0].1.ends_with("*Message:* rates & dates?#50% off"));
    }

    #[test]
    fn empty_fields_pass_through() {
        let link = Enquiry::default().deep_link(&ContactConfig::default()).unwrap();
        assert!(link.query().unwrap().ends_with("%2AMessage%3A%2A%20"));
    }

    #[test]
    fn custom_destination() {
        let config = ContactConfig {
            host: "chat.example".into(),
            phone: "15550001111".into(),
            business_name: "Lens & Light".into(),
        };
        let link = enquiry().deep_link(&config).unwrap();
        assert!(
            link.as_str()
                .starts_with("https://chat.example/15550001111?text=Hello%20Lens%20%26%20Light%2C")
        );
    }
}
