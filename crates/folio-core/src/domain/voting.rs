use serde::{Deserialize, Serialize};

/// A viewer's vote on a blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserVote {
    Upvote,
    Downvote,
}

impl UserVote {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upvote" => Some(Self::Upvote),
            "downvote" => Some(Self::Downvote),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        }
    }
}

/// Voting section of a blog document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogVoting {
    pub enabled: bool,
    pub upvotes: u32,
    pub downvotes: u32,
    pub user_vote: Option<UserVote>,
}

impl BlogVoting {
    pub fn tally(&self) -> VoteTally {
        VoteTally {
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            user_vote: self.user_vote,
        }
    }
}

/// Vote counters plus the viewer's own vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub upvotes: u32,
    pub downvotes: u32,
    pub user_vote: Option<UserVote>,
}

/// The network call implied by a vote transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteCall {
    Cast(UserVote),
    Remove,
}

impl VoteTally {
    pub fn new(upvotes: u32, downvotes: u32, user_vote: Option<UserVote>) -> Self {
        Self {
            upvotes,
            downvotes,
            user_vote,
        }
    }

    /// Apply a viewer action.
    ///
    /// Repeating the current vote toggles it off; voting the other way swaps
    /// it. Counters saturate at both ends.
    pub fn apply(self, vote: UserVote) -> (VoteTally, VoteCall) {
        let mut next = self.without_user_vote();

        if self.user_vote == Some(vote) {
            return (next, VoteCall::Remove);
        }

        match vote {
            UserVote::Upvote => next.upvotes = next.upvotes.saturating_add(1),
            UserVote::Downvote => next.downvotes = next.downvotes.saturating_add(1),
        }
        next.user_vote = Some(vote);

        (next, VoteCall::Cast(vote))
    }

    /// Tally with the viewer's vote withdrawn.
    pub fn without_user_vote(self) -> VoteTally {
        let mut next = self;
        match self.user_vote {
            Some(UserVote::Upvote) => next.upvotes = next.upvotes.saturating_sub(1),
            Some(UserVote::Downvote) => next.downvotes = next.downvotes.saturating_sub(1),
            None => {}
        }
        next.user_vote = None;
        next
    }

    /// Net score shown next to the vote buttons.
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}
