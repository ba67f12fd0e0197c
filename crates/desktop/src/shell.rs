//! Command-line shell over the API clients.
//!
//! Every command prints JSON on success; failures bubble up as `anyhow`
//! errors with the backend's message.

use std::io::BufRead;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use ledgerdesk_auth::{GuardState, Role, RouteGuard};
use ledgerdesk_client::{Fetched, Resource, ResourceClient};
use ledgerdesk_core::RecordId;
use ledgerdesk_forms::forms::{CurrencyRevaluationForm, LoginForm};
use ledgerdesk_forms::{FormView, SubmitOutcome};

use crate::AppState;

#[derive(Parser, Debug)]
#[command(name = "ledgerdesk", version, about = "LedgerDesk ERP command-line shell")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Backend collections reachable from the shell.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceName {
    GlTypes,
    TaxAlgorithms,
    PurchData,
    AuditTrails,
    SuppAllocations,
    WoIssues,
    WoIssueItems,
    CurrencyRevaluations,
    CrmPersons,
    CrmContacts,
}

/// Derived lookups (full list + client-side filter).
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    PurchDataBySupplier,
    PurchDataByStock,
    WoIssuesByWorkOrder,
    WoIssueItemsByIssue,
    SuppAllocationsBySupplier,
    AuditTrailsByType,
    ContactsByBranch,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Sign in and keep the issued token
    Login {
        username: String,
        /// Read from stdin when not set
        #[arg(long, env = "LEDGERDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out and forget the token
    Logout,
    /// Show the signed-in user
    #[command(name = "whoami")]
    WhoAmI,
    /// List every record of a resource
    List {
        #[arg(value_enum)]
        resource: ResourceName,
    },
    /// Fetch one record by id
    Get {
        #[arg(value_enum)]
        resource: ResourceName,
        id: RecordId,
    },
    /// Run a derived lookup
    Lookup {
        #[arg(value_enum)]
        lookup: Lookup,
        id: RecordId,
    },
    /// Revalue foreign-currency balances as of a date (YYYY-MM-DD)
    Revaluate {
        date: String,
        #[arg(trailing_var_arg = true)]
        memo: Vec<String>,
    },
    /// Check whether the signed-in user may enter a route guarded by roles
    Guard { roles: Vec<String> },
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("failed to render output")
}

fn fetched_json<T: Serialize>(fetched: Fetched<T>) -> anyhow::Result<String> {
    match fetched.into_result()? {
        Some(value) => to_json(&value),
        None => Ok("[]".to_string()),
    }
}

async fn list_json<R>(client: &ResourceClient<R>) -> anyhow::Result<String>
where
    R: Resource,
    R::Record: Serialize,
{
    fetched_json(client.list().await)
}

async fn get_json<R>(client: &ResourceClient<R>, id: RecordId) -> anyhow::Result<String>
where
    R: Resource,
    R::Record: Serialize,
{
    match client.get_by_id(id.clone()).await.into_result()? {
        Some(record) => to_json(&record),
        None => bail!("{} {id} not found", R::NAME),
    }
}

fn read_password() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn outcome<T>(outcome: SubmitOutcome<T>) -> anyhow::Result<T> {
    match outcome {
        SubmitOutcome::Saved(value) => Ok(value),
        SubmitOutcome::Invalid(errors) => Err(anyhow!(errors).context("invalid input")),
        SubmitOutcome::Failed(message) => bail!(message),
    }
}

/// Run `command` and return what should be printed.
pub async fn run(state: &AppState, command: Command) -> anyhow::Result<String> {
    let clients = &state.clients;

    match command {
        Command::Login { username, password } => {
            let mut view = FormView::<LoginForm>::open(&state.storage);
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            view.edit(|d| {
                d.username = username;
                d.password = password;
            });

            let login = outcome(view.login(&clients.auth).await)?;
            to_json(&login.body)
        }

        Command::Logout => {
            clients.auth.logout().await?;
            Ok("signed out".to_string())
        }

        Command::WhoAmI => match clients.auth.current_user().await.into_result()? {
            Some(user) => to_json(&user),
            None => bail!("not signed in"),
        },

        Command::List { resource } => match resource {
            ResourceName::GlTypes => list_json(&clients.gl_types).await,
            ResourceName::TaxAlgorithms => list_json(&clients.tax_algorithms).await,
            ResourceName::PurchData => list_json(&clients.purch_data).await,
            ResourceName::AuditTrails => list_json(&clients.audit_trails).await,
            ResourceName::SuppAllocations => list_json(&clients.supp_allocations).await,
            ResourceName::WoIssues => list_json(&clients.wo_issues).await,
            ResourceName::WoIssueItems => list_json(&clients.wo_issue_items).await,
            ResourceName::CurrencyRevaluations => list_json(&clients.currency_revaluations).await,
            ResourceName::CrmPersons => list_json(&clients.crm_persons).await,
            ResourceName::CrmContacts => list_json(&clients.crm_contacts).await,
        },

        Command::Get { resource, id } => match resource {
            ResourceName::GlTypes => get_json(&clients.gl_types, id).await,
            ResourceName::TaxAlgorithms => get_json(&clients.tax_algorithms, id).await,
            ResourceName::PurchData => get_json(&clients.purch_data, id).await,
            ResourceName::AuditTrails => get_json(&clients.audit_trails, id).await,
            ResourceName::SuppAllocations => get_json(&clients.supp_allocations, id).await,
            ResourceName::WoIssues => get_json(&clients.wo_issues, id).await,
            ResourceName::WoIssueItems => get_json(&clients.wo_issue_items, id).await,
            ResourceName::CurrencyRevaluations => get_json(&clients.currency_revaluations, id).await,
            ResourceName::CrmPersons => get_json(&clients.crm_persons, id).await,
            ResourceName::CrmContacts => get_json(&clients.crm_contacts, id).await,
        },

        Command::Lookup { lookup, id } => match lookup {
            Lookup::PurchDataBySupplier => fetched_json(clients.purch_data.by_supplier(id).await),
            Lookup::PurchDataByStock => fetched_json(clients.purch_data.by_stock_item(id).await),
            Lookup::WoIssuesByWorkOrder => fetched_json(clients.wo_issues.by_work_order(id).await),
            Lookup::WoIssueItemsByIssue => fetched_json(clients.wo_issue_items.by_issue(id).await),
            Lookup::SuppAllocationsBySupplier => fetched_json(clients.supp_allocations.by_supplier(id).await),
            Lookup::AuditTrailsByType => fetched_json(clients.audit_trails.by_trans_type(id).await),
            Lookup::ContactsByBranch => fetched_json(clients.customer_contacts.contacts_by_branch(id).await),
        },

        Command::Revaluate { date, memo } => {
            let mut view = FormView::<CurrencyRevaluationForm>::open(&state.storage);
            view.edit(|d| {
                d.date = date;
                d.memo = memo.join(" ");
            });
            let run = outcome(view.revaluate(&clients.currency_revaluations).await)?;
            to_json(&run)
        }

        Command::Guard { roles } => {
            let guard = RouteGuard::new(roles.into_iter().map(Role::new));
            match clients.auth.guard(&guard).await {
                GuardState::Allowed(user) => Ok(format!("allowed: {} ({})", user.username, user.role)),
                GuardState::Denied(reason) => bail!("denied: {reason}"),
                GuardState::Loading => bail!("user fetch did not settle"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Command, clap::Error> {
        let args = std::iter::once("ledgerdesk").chain(raw.split_whitespace());
        Cli::try_parse_from(args).map(|cli| cli.command)
    }

    #[test]
    fn command_tree_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_prints_help() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
    }

    #[test]
    fn parses_lookups_with_numeric_ids() {
        assert_eq!(
            parse("lookup purch-data-by-supplier 7").unwrap(),
            Command::Lookup {
                lookup: Lookup::PurchDataBySupplier,
                id: RecordId::Int(7)
            }
        );
    }

    #[test]
    fn text_ids_are_kept() {
        assert_eq!(
            parse("get purch-data BOLT").unwrap(),
            Command::Get {
                resource: ResourceName::PurchData,
                id: RecordId::from("BOLT")
            }
        );
    }

    #[test]
    fn revaluate_collects_the_memo() {
        assert_eq!(
            parse("revaluate 2024-06-30 Q2 close").unwrap(),
            Command::Revaluate {
                date: "2024-06-30".into(),
                memo: vec!["Q2".into(), "close".into()]
            }
        );
    }

    #[test]
    fn login_takes_the_password_flag() {
        assert_eq!(
            parse("login jdoe --password hunter2").unwrap(),
            Command::Login {
                username: "jdoe".into(),
                password: Some("hunter2".into())
            }
        );
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(parse("list invoices").is_err());
        assert!(parse("frobnicate").is_err());
        assert!(parse("get gl-types").is_err());
    }

    #[test]
    fn guard_collects_roles() {
        assert_eq!(
            parse("guard admin accountant").unwrap(),
            Command::Guard {
                roles: vec!["admin".into(), "accountant".into()]
            }
        );
        assert_eq!(parse("whoami").unwrap(), Command::WhoAmI);
    }
}
