use adminctl_core::{ProvisionAction, ProvisionRequest, Provisioner};
use adminctl_idp::AdminApiClient;
use adminctl_postgres::PgRoleStore;
use anyhow::Result;

use crate::cli::ProvisionArgs;
use crate::output::{print_success, print_warning};

pub async fn run(directory: &AdminApiClient, store: &PgRoleStore, args: ProvisionArgs) -> Result<()> {
    let mut request = ProvisionRequest::new(&args.email);
    request.password = args.password;
    request.name = args.name;

    let outcome = Provisioner::new(directory, store).run(&request).await?;

    match outcome.action() {
        ProvisionAction::CreatedBoth => print_success(&format!(
            "Created identity {} and role record {} for {}",
            outcome.identity_id, outcome.record_id, args.email
        )),
        ProvisionAction::RecordCreated => print_success(&format!(
            "Reused identity {}; created role record {}",
            outcome.identity_id, outcome.record_id
        )),
        ProvisionAction::AlreadyProvisioned => print_success(&format!(
            "{} is already provisioned (identity {}, role record {}); nothing to write",
            args.email, outcome.identity_id, outcome.record_id
        )),
    }

    if !outcome.password_known {
        if outcome.identity_created {
            print_warning("identity was created without a password; set one with reset-password");
        } else {
            println!("  existing credential left unchanged");
        }
    }

    Ok(())
}
