use adminctl_core::{PasswordReset, ResetOutcome};
use adminctl_idp::AdminApiClient;
use adminctl_postgres::PgRoleStore;
use anyhow::Result;

use crate::cli::ResetPasswordArgs;
use crate::output::{print_known_emails, print_success, print_warning};

pub async fn run(
    directory: &AdminApiClient,
    store: &PgRoleStore,
    args: ResetPasswordArgs,
) -> Result<()> {
    let outcome = PasswordReset::new(directory, store)
        .run(&args.email, &args.new_password)
        .await?;

    match outcome {
        ResetOutcome::NotFound { known_emails } => {
            // A normal terminal branch: nothing was changed.
            print_warning(&format!("no identity found for {}", args.email));
            print_known_emails(&known_emails);
        }
        ResetOutcome::Rotated {
            identity_id,
            role_record,
        } => {
            print_success(&format!("Password updated for {}", args.email));
            match role_record {
                Some(record) => {
                    print_success(&format!("Role record {} confirmed", record.id));
                }
                None => print_warning(&format!(
                    "identity {identity_id} has no privileged-role record; run `adminctl provision {}` to attach one",
                    args.email
                )),
            }
        }
    }

    Ok(())
}
