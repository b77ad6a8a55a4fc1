//! Client-side predicate passes over already-fetched collections

use mailshot_api::models::{Campaign, CampaignStatus, Client};

/// True when first name, last name or email contains `query`, ignoring case
pub fn client_matches(client: &Client, query: &str) -> bool {
    let query = query.to_lowercase();
    [&client.first_name, &client.last_name, &client.email]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
}

pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    clients
        .iter()
        .filter(|client| client_matches(client, query))
        .collect()
}

/// Dashboard counts of campaigns by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignTally {
    pub active: usize,
    pub completed: usize,
}

impl CampaignTally {
    pub fn from_statuses(statuses: impl IntoIterator<Item = CampaignStatus>) -> Self {
        statuses
            .into_iter()
            .fold(Self::default(), |mut tally, status| {
                if status.is_active() {
                    tally.active += 1;
                } else if status.is_completed() {
                    tally.completed += 1;
                }
                tally
            })
    }

    pub fn from_campaigns(campaigns: &[Campaign]) -> Self {
        Self::from_statuses(campaigns.iter().map(|c| c.status))
    }
}

/// Campaigns with delivery data, in backend order
pub fn reportable(campaigns: Vec<Campaign>) -> Vec<Campaign> {
    campaigns
        .into_iter()
        .filter(|c| c.status.is_reportable())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(first: &str, last: &str, email: &str) -> Client {
        Client {
            id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            active: true,
            registered_at: None,
        }
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let clients = vec![
            client("João", "Silva", "joao@x.com"),
            client("Maria", "Santos", "maria@y.com"),
        ];
        assert_eq!(filter_clients(&clients, "SILVA").len(), 1);
        assert_eq!(filter_clients(&clients, "y.com")[0].first_name, "Maria");
        assert_eq!(filter_clients(&clients, "joão").len(), 1);
        assert!(filter_clients(&clients, "pedro").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let clients = vec![client("A", "B", "a@b.c"), client("C", "D", "c@d.e")];
        assert_eq!(filter_clients(&clients, "").len(), 2);
    }

    #[test]
    fn tally_partitions_statuses() {
        use CampaignStatus::*;
        let tally =
            CampaignTally::from_statuses([Draft, Scheduled, Sending, Completed, Cancelled, Unknown]);
        assert_eq!(tally, CampaignTally { active: 3, completed: 1 });
    }
}
