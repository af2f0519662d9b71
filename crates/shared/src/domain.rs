#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contribution {
    Information,
    Expertise,
    Financial,
}

impl Contribution {
    pub const ALL: [Contribution; 3] = [
        Contribution::Information,
        Contribution::Expertise,
        Contribution::Financial,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Organisation,
    Consent,
}

/// Form data for one session. Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organisation: String,
    pub contribution_information: bool,
    pub contribution_expertise: bool,
    pub contribution_financial: bool,
    pub consent_given: bool,
}

impl SubmissionDraft {
    pub fn contribution(&self, contribution: Contribution) -> bool {
        match contribution {
            Contribution::Information => self.contribution_information,
            Contribution::Expertise => self.contribution_expertise,
            Contribution::Financial => self.contribution_financial,
        }
    }

    pub fn set_contribution(&mut self, contribution: Contribution, selected: bool) {
        match contribution {
            Contribution::Information => self.contribution_information = selected,
            Contribution::Expertise => self.contribution_expertise = selected,
            Contribution::Financial => self.contribution_financial = selected,
        }
    }

    /// Recomputed from the draft on every call; there is no cached copy to go stale.
    pub fn has_selected_contribution(&self) -> bool {
        self.contribution_information || self.contribution_expertise || self.contribution_financial
    }

    pub fn selected_contributions(&self) -> Vec<Contribution> {
        Contribution::ALL
            .into_iter()
            .filter(|c| self.contribution(*c))
            .collect()
    }
}
