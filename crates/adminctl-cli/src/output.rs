use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Render the emails known to the identity provider, for the operator to
/// spot a typo after a failed lookup.
pub fn print_known_emails(emails: &[String]) {
    if emails.is_empty() {
        println!("The identity provider has no accounts at all.");
        return;
    }
    let mut builder = Builder::default();
    builder.push_record(["Known emails"]);
    for email in emails {
        builder.push_record([email.as_str()]);
    }
    println!("{}", builder.build().with(Style::rounded()));
}
