use super::ui;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use panelstore::{
    Dashboard, LeadForm, LeadStatus, PanelConfig, PanelError, StatusFilter, UserEdit, UserForm,
    UserStatus,
};
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "panelstore")]
#[command(about = "Manage the user and lead panels stored in a local data directory")]
struct Cli {
    /// Directory holding one JSON file per storage slot
    #[arg(long, env = "PANELSTORE_DATA_DIR", default_value = ".panelstore")]
    data_dir: PathBuf,

    #[arg(long, env = "PANELSTORE_USERS_KEY", default_value = PanelConfig::DEFAULT_USERS_KEY)]
    users_key: String,

    #[arg(long, env = "PANELSTORE_LEADS_KEY", default_value = PanelConfig::DEFAULT_LEADS_KEY)]
    leads_key: String,

    /// Rows per page for both panels
    #[arg(long, env = "PANELSTORE_PAGE_SIZE", default_value_t = 10)]
    page_size: usize,

    #[arg(long, env = "PANELSTORE_LEAD_LIMIT", default_value_t = PanelConfig::DEFAULT_LEAD_LIMIT)]
    lead_limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// User manager panel
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Lead tracker panel
    Leads {
        #[command(subcommand)]
        action: LeadAction,
    },
    /// Record counts per status for both panels
    Stats,
}

#[derive(Args)]
struct ListArgs {
    /// `all` or one status name
    #[arg(long, default_value = "all")]
    status: String,
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Subcommand)]
enum UserAction {
    List(ListArgs),
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        role: String,
    },
    Edit {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    Toggle {
        #[arg(long)]
        email: String,
    },
    Remove {
        #[arg(long)]
        email: String,
    },
    Clear,
}

#[derive(Args)]
struct LeadFormArgs {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    contact: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    website: Option<String>,
    #[arg(long)]
    industry: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl LeadFormArgs {
    /// Overlay the given flags on `base`.
    fn merge_into(self, mut base: LeadForm) -> LeadForm {
        if let Some(v) = self.company {
            base.company_name = v;
        }
        if let Some(v) = self.contact {
            base.contact_name = v;
        }
        if let Some(v) = self.email {
            base.email = v;
        }
        if let Some(v) = self.website {
            base.website = v;
        }
        if let Some(v) = self.industry {
            base.industry = v;
        }
        if let Some(v) = self.notes {
            base.notes = v;
        }
        base
    }
}

#[derive(Subcommand)]
enum LeadAction {
    List(ListArgs),
    Show {
        #[arg(long)]
        id: String,
    },
    Add(LeadFormArgs),
    Edit {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        fields: LeadFormArgs,
    },
    Advance {
        #[arg(long)]
        id: String,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
    Clear,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = PanelConfig::new()
        .data_dir(cli.data_dir)
        .users_key(&cli.users_key)
        .leads_key(&cli.leads_key)
        .users_page_size(cli.page_size)
        .leads_page_size(cli.page_size)
        .lead_limit(cli.lead_limit);

    let mut dashboard = Dashboard::open_dir(config).context("failed to open data directory")?;

    let outcome = match cli.command {
        Command::Users { action } => run_users(&mut dashboard, action),
        Command::Leads { action } => run_leads(&mut dashboard, action),
        Command::Stats => {
            println!("Users  {}", dashboard.users.stats());
            println!("Leads  {}", dashboard.leads.stats());
            Ok(())
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err @ (PanelError::Validation(_) | PanelError::CapacityReached { .. })) => {
            ui::print_rejection(&err);
            Ok(ExitCode::from(2))
        }
        Err(err) => Err(err.into()),
    }
}

fn run_users(dashboard: &mut Dashboard, action: UserAction) -> Result<(), PanelError> {
    let panel = &mut dashboard.users;
    match action {
        UserAction::List(args) => {
            panel.set_filter(parse_filter(&args.status, &UserStatus::ALL, UserStatus::parse)?);
            panel.set_search(args.search);
            panel.go_to_page(args.page);
            ui::print_user_page(&panel.render());
        }
        UserAction::Add {
            email,
            username,
            role,
        } => {
            let user = panel.add_user(&UserForm::new(email, username, role))?;
            println!("User added: {}", user.email);
        }
        UserAction::Edit {
            email,
            username,
            role,
        } => {
            let Some(current) = panel.find(&email).cloned() else {
                println!("No user with email {}", email);
                return Ok(());
            };
            let edit = UserEdit::new(
                username.unwrap_or(current.username),
                role.unwrap_or_else(|| current.role.to_string()),
            );
            if let Some(user) = panel.update_user(&email, &edit)? {
                println!("User updated: {} ({}, {})", user.email, user.username, user.role);
            }
        }
        UserAction::Toggle { email } => match panel.toggle_status(&email)? {
            Some(status) => println!("Status toggled: {} is now {}", email, status),
            None => println!("No user with email {}", email),
        },
        UserAction::Remove { email } => {
            if panel.remove_user(&email)? {
                println!("User removed.");
            } else {
                println!("No user with email {}", email);
            }
        }
        UserAction::Clear => {
            panel.clear_all()?;
            println!("All users cleared.");
        }
    }
    Ok(())
}

fn run_leads(dashboard: &mut Dashboard, action: LeadAction) -> Result<(), PanelError> {
    let panel = &mut dashboard.leads;
    match action {
        LeadAction::List(args) => {
            panel.set_filter(parse_filter(&args.status, &LeadStatus::ALL, LeadStatus::parse)?);
            panel.set_search(args.search);
            panel.go_to_page(args.page);
            ui::print_lead_page(&panel.render());
        }
        LeadAction::Show { id } => match panel.find(&id) {
            Some(lead) => ui::print_lead_detail(lead),
            None => println!("No lead with id {}", id),
        },
        LeadAction::Add(fields) => {
            let lead = panel.add_lead(&fields.merge_into(LeadForm::default()))?;
            println!("Lead added: {} ({})", lead.company_name, lead.id);
        }
        LeadAction::Edit { id, fields } => {
            let Some(current) = panel.find(&id) else {
                println!("No lead with id {}", id);
                return Ok(());
            };
            let form = fields.merge_into(LeadForm::from_lead(current));
            if let Some(lead) = panel.update_lead(&id, &form)? {
                println!("Lead updated: {} ({})", lead.company_name, lead.id);
            }
        }
        LeadAction::Advance { id } => match panel.advance_status(&id)? {
            Some(status) => println!("Lead {} moved to {}", id, status),
            None => println!("No lead with id {}", id),
        },
        LeadAction::Delete { id } => {
            if panel.delete_lead(&id)? {
                println!("Lead deleted.");
            } else {
                println!("No lead with id {}", id);
            }
        }
        LeadAction::Clear => {
            panel.clear_all()?;
            println!("All leads cleared.");
        }
    }
    Ok(())
}

fn parse_filter<S: fmt::Display>(
    raw: &str,
    known: &[S],
    parse: fn(&str) -> Option<S>,
) -> Result<StatusFilter<S>, PanelError> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }
    parse(raw).map(StatusFilter::Only).ok_or_else(|| {
        let choices: Vec<String> = known.iter().map(|s| s.to_string()).collect();
        PanelError::validation(
            "status",
            format!("Unknown status '{}'. Use all, {}.", raw, choices.join(", ")),
        )
    })
}

