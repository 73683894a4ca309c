use lettre::AsyncTransport;
use secrecy::ExposeSecret;

use crate::settings::EmailSettings;
use crate::types::RegistrantRecord;

#[tracing::instrument(
    name = "Generic e-mail sending function.",
    skip(settings, subject, html_content, text_content),
    fields(recipient_email = %recipient_email)
)]
pub async fn send_email(
    settings: EmailSettings,
    recipient_email: String,
    subject: impl Into<String>,
    html_content: impl Into<String>,
    text_content: impl Into<String>,
) -> Result<(), String> {
    let email = lettre::Message::builder()
        .from(
            format!("{} <{}>", "Charity Auction", settings.host_user)
                .parse()
                .map_err(|e| format!("Invalid sender address: {:#?}", e))?,
        )
        .to(recipient_email
            .parse()
            .map_err(|e| format!("Invalid recipient address: {:#?}", e))?)
        .subject(subject)
        .multipart(
            lettre::message::MultiPart::alternative()
                .singlepart(
                    lettre::message::SinglePart::builder()
                        .header(lettre::message::header::ContentType::TEXT_PLAIN)
                        .body(text_content.into()),
                )
                .singlepart(
                    lettre::message::SinglePart::builder()
                        .header(lettre::message::header::ContentType::TEXT_HTML)
                        .body(html_content.into()),
                ),
        )
        .map_err(|e| format!("Could not build email: {:#?}", e))?;

    let creds = lettre::transport::smtp::authentication::Credentials::new(
        settings.host_user.clone(),
        settings.host_user_password.expose_secret().to_owned(),
    );

    // Open a remote connection to the smtp server
    let mut mailer_builder =
        lettre::AsyncSmtpTransport::<lettre::Tokio1Executor>::relay(&settings.host)
            .map_err(|e| format!("Could not create SMTP transport: {:#?}", e))?
            .port(settings.port);

    if settings.authentication {
        mailer_builder = mailer_builder.credentials(creds);
    } else {
        mailer_builder = mailer_builder.tls(lettre::transport::smtp::client::Tls::None);
    }

    let mailer: lettre::AsyncSmtpTransport<lettre::Tokio1Executor> = mailer_builder.build();

    match mailer.send(email).await {
        Ok(_) => {
            tracing::event!(target: "auction", tracing::Level::INFO, "Email successfully sent!");
            Ok(())
        }
        Err(e) => {
            tracing::event!(target: "auction", tracing::Level::ERROR, "Could not send email: {:#?}", e);
            Err(format!("Could not send email: {:#?}", e))
        }
    }
}

/// Render the admin signup notification and send it from a spawned task.
/// Exactly one attempt; both outcomes end up in the log and nowhere else.
#[tracing::instrument(
    name = "Queueing admin signup notification",
    skip(settings, registrant),
    fields(user_email = %registrant.email)
)]
pub fn send_registration_email(settings: EmailSettings, registrant: RegistrantRecord) {
    let template = match crate::ENV.get_template("registration_email.html") {
        Ok(t) => t,
        Err(e) => {
            tracing::event!(target: "auction", tracing::Level::ERROR, "Missing registration email template: {:#?}", e);
            return;
        }
    };

    let joined_at = registrant
        .joined_at
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default();
    // Parameter names are fixed by the admin's email template.
    let ctx = minijinja::context! {
        user_email => &registrant.email,
        user_password => &registrant.password,
        user_role => registrant.role,
        joined_at => joined_at,
        user_nickname => &registrant.nickname,
    };
    let html_text = match template.render(ctx) {
        Ok(html) => html,
        Err(e) => {
            tracing::event!(target: "auction", tracing::Level::ERROR, "Could not render registration email: {:#?}", e);
            return;
        }
    };
    let text = format!(
        "New charity auction signup: {} ({})",
        registrant.email, registrant.nickname
    );

    let admin_email = settings.admin_email.clone();
    tokio::spawn(async move {
        match send_email(
            settings,
            admin_email,
            "New charity auction signup",
            html_text,
            text,
        )
        .await
        {
            Ok(_) => {
                tracing::event!(target: "auction", tracing::Level::INFO, "Admin notified of new signup: {}", registrant.email);
            }
            Err(e) => {
                tracing::event!(target: "auction", tracing::Level::ERROR, "Could not notify admin of new signup: {}", e);
            }
        }
    });
}
