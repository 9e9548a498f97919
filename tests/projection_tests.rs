/// Projection tests
///
/// Filtering, search and pagination properties over realistic lead data
/// Run with: cargo test --test projection_tests

use panelstore::view::{filter_records, page_count, project};
use panelstore::{Lead, LeadForm, LeadStatus, StatusFilter, ViewQuery};

fn sample_leads(n: usize) -> Vec<Lead> {
    let industries = ["Retail", "Fintech", "Healthcare"];
    (0..n)
        .map(|i| {
            let fields = LeadForm::new(
                format!("Company {:03}", i),
                format!("Contact {}", i),
                format!("contact{}@example.com", i),
            )
            .industry(industries[i % industries.len()])
            .validate()
            .unwrap();
            let mut lead = Lead::from_fields(fields);
            lead.status = LeadStatus::ALL[i % LeadStatus::ALL.len()];
            lead
        })
        .collect()
}

#[test]
fn test_pages_reproduce_filtered_sequence_exactly_once() {
    let leads = sample_leads(57);
    for page_size in [1, 4, 10, 57, 100] {
        for status in [
            StatusFilter::All,
            StatusFilter::Only(LeadStatus::Qualified),
        ] {
            let query = ViewQuery::new(page_size)
                .with_status(status)
                .with_search("fintech");
            let expected: Vec<Lead> = filter_records(&leads, &query.status, &query.search)
                .into_iter()
                .cloned()
                .collect();

            let first = project(&leads, &query);
            assert_eq!(first.total_pages, page_count(expected.len(), page_size));

            let mut concatenated = Vec::new();
            for page in 1..=first.total_pages {
                let view = project(&leads, &query.clone().with_page(page));
                assert!(view.items.len() <= page_size);
                concatenated.extend(view.items);
            }
            assert_eq!(concatenated, expected, "page_size={}", page_size);
        }
    }
}

#[test]
fn test_same_filter_yields_same_subset() {
    let leads = sample_leads(30);
    let filtered = ViewQuery::new(100).with_status(StatusFilter::Only(LeadStatus::Closed));
    let unfiltered = ViewQuery::new(100);

    let first = project(&leads, &filtered);
    let all = project(&leads, &unfiltered);
    let again = project(&leads, &filtered);

    assert_eq!(first, again);
    assert_eq!(all.items.len(), 30);
    assert!(first.items.iter().all(|l| l.status == LeadStatus::Closed));
    assert_eq!(first.items.len(), 7);
}

#[test]
fn test_filters_compose_with_and() {
    let leads = sample_leads(12);
    let query = ViewQuery::new(50)
        .with_status(StatusFilter::Only(LeadStatus::New))
        .with_search("RETAIL");
    let page = project(&leads, &query);

    // New: 0, 4, 8; Retail: 0, 3, 6, 9
    let companies: Vec<&str> = page.items.iter().map(|l| l.company_name.as_str()).collect();
    assert_eq!(companies, vec!["Company 000"]);
}

#[test]
fn test_empty_store_has_one_page_and_placeholder() {
    let page = project::<Lead>(&[], &ViewQuery::new(10).with_page(4));
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_count, 0);
    assert_eq!(page.placeholder, Some("No leads match your filters."));
}
