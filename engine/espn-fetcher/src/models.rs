//! Request shapes for the ESPN fantasy league endpoint

/// One `view` parameter value understood by the league endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueView {
    /// Schedule with scores and `winner` flags
    MatchupScore,
    /// Team list with names and records
    Team,
    /// Schedule with per-side roster entries
    Boxscore,
    Roster,
}

impl LeagueView {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueView::MatchupScore => "mMatchupScore",
            LeagueView::Team => "mTeam",
            LeagueView::Boxscore => "mBoxscore",
            LeagueView::Roster => "mRoster",
        }
    }
}

/// A single league read: which views, scoped to which scoring period
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueRequest {
    pub views: Vec<LeagueView>,
    pub scoring_period: Option<u32>,
}

impl LeagueRequest {
    /// Scores and team list, used for matchups and standings
    pub fn scoreboard(week: u32) -> Self {
        Self { views: vec![LeagueView::MatchupScore, LeagueView::Team], scoring_period: Some(week) }
    }

    pub fn teams() -> Self {
        Self { views: vec![LeagueView::Team], scoring_period: None }
    }

    /// Roster detail for the week, used by player-level rules
    pub fn boxscore(week: u32) -> Self {
        Self {
            views: vec![LeagueView::MatchupScore, LeagueView::Boxscore, LeagueView::Roster],
            scoring_period: Some(week),
        }
    }

    /// Query pairs in request order; `view` repeats once per view
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query: Vec<(&'static str, String)> =
            self.views.iter().map(|view| ("view", view.as_str().to_string())).collect();
        if let Some(week) = self.scoring_period {
            query.push(("scoringPeriodId", week.to_string()));
        }
        query
    }
}

/// `{base}/seasons/{season}/segments/0/leagues/{league}`
pub fn league_url(base_url: &str, season: i32, league_id: &str) -> String {
    format!(
        "{}/seasons/{}/segments/0/leagues/{}",
        base_url.trim_end_matches('/'),
        season,
        league_id
    )
}
