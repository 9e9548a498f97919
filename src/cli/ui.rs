use panelstore::{Lead, PanelError, User, ViewPage};

pub fn print_user_page(page: &ViewPage<User>) {
    if let Some(placeholder) = page.placeholder {
        println!("{}", placeholder);
        return;
    }

    println!("{:<32} {:<16} {:<8} {:<8}", "EMAIL", "USERNAME", "ROLE", "STATUS");
    for user in &page.items {
        println!(
            "{:<32} {:<16} {:<8} {:<8}",
            user.email,
            user.username,
            user.role.to_string(),
            user.status.to_string()
        );
    }
    print_footer(page);
}

pub fn print_lead_page(page: &ViewPage<Lead>) {
    if let Some(placeholder) = page.placeholder {
        println!("{}", placeholder);
        return;
    }

    println!(
        "{:<36} {:<24} {:<20} {:<10} {:<10}",
        "ID", "COMPANY", "CONTACT", "STATUS", "UPDATED"
    );
    for lead in &page.items {
        println!(
            "{:<36} {:<24} {:<20} {:<10} {:<10}",
            lead.id,
            truncate(&lead.company_name, 24),
            truncate(&lead.contact_name, 20),
            lead.status.to_string(),
            lead.updated_at.format("%Y-%m-%d").to_string(),
        );
    }
    print_footer(page);
}

pub fn print_lead_detail(lead: &Lead) {
    println!("Id:        {}", lead.id);
    println!("Company:   {}", lead.company_name);
    println!("Contact:   {}", lead.contact_name);
    println!("Email:     {}", lead.email);
    println!("Website:   {}", or_dash(&lead.website));
    println!("Industry:  {}", or_dash(&lead.industry));
    println!("Status:    {}", lead.status);
    println!("Created:   {}", lead.created_at.to_rfc3339());
    println!("Updated:   {}", lead.updated_at.to_rfc3339());
    println!("Notes:     {}", or_dash(&lead.notes));
}

/// Report a rejected operation on stderr.
pub fn print_rejection(err: &PanelError) {
    match err {
        PanelError::Validation(errors) => {
            eprintln!("Fix the highlighted fields.");
            for field in errors.iter() {
                eprintln!("  {:<12} {}", field.field, field.message);
            }
        }
        PanelError::CapacityReached { limit } => {
            eprintln!("!! Lead limit reached: the tracker holds at most {} leads.", limit);
            eprintln!("!! Delete or close out old leads before adding new ones.");
        }
        other => eprintln!("{}", other),
    }
}

fn print_footer<R>(page: &ViewPage<R>) {
    println!(
        "{}  ({} shown, {} matching, {} total)",
        page.indicator(),
        page.items.len(),
        page.filtered_count,
        page.total_count
    );
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let cut: String = value.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut)
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
