use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use futures::join;
use rand::seq::SliceRandom;
use rand::Rng;
use surrealdb::sql::Thing;

use crate::{
    database::client::Db,
    entities::{
        photo::photo_entity::PhotoDbService,
        user_auth::{
            follow_entity::{FollowCount, FollowDbService},
            local_user_entity::{LocalUser, LocalUserDbService},
        },
    },
    middleware::{ctx::Ctx, error::CtxResult},
};

/// Candidates ordered by count, highest first, ties by id.
pub fn rank_by_count(counts: Vec<FollowCount>, candidates: &HashSet<Thing>, take: usize) -> Vec<Thing> {
    let mut counts: Vec<(Thing, i64)> = counts
        .into_iter()
        .filter(|c| c.nr > 0 && candidates.contains(&c.out))
        .map(|c| (c.out, c.nr))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.into_iter().take(take).map(|(id, _)| id).collect()
}

/// Candidates ordered by their latest upload, newest first.
pub fn rank_by_latest(
    uploads: Vec<(Thing, DateTime<Utc>)>,
    candidates: &HashSet<Thing>,
    take: usize,
) -> Vec<Thing> {
    let mut latest: HashMap<Thing, DateTime<Utc>> = HashMap::new();
    for (user, time) in uploads {
        if !candidates.contains(&user) {
            continue;
        }
        let entry = latest.entry(user).or_insert(time);
        if time > *entry {
            *entry = time;
        }
    }
    let mut latest: Vec<(Thing, DateTime<Utc>)> = latest.into_iter().collect();
    latest.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    latest.into_iter().take(take).map(|(id, _)| id).collect()
}

/// Sums `len - index` per id over all lists, keeping first-seen order.
pub fn merge_position_scores(lists: &[Vec<Thing>]) -> Vec<(Thing, i64)> {
    let mut merged: Vec<(Thing, i64)> = vec![];
    let mut index: HashMap<Thing, usize> = HashMap::new();
    for list in lists {
        let len = list.len() as i64;
        for (i, id) in list.iter().enumerate() {
            let score = len - i as i64;
            match index.get(id) {
                Some(pos) => merged[*pos].1 += score,
                None => {
                    index.insert(id.clone(), merged.len());
                    merged.push((id.clone(), score));
                }
            }
        }
    }
    merged
}

/// Tops up to `limit` entries with random unscored candidates, then orders by score.
pub fn finalize_ranking<R: Rng + ?Sized>(
    mut scored: Vec<(Thing, i64)>,
    candidates: &[Thing],
    limit: usize,
    rng: &mut R,
) -> Vec<Thing> {
    if scored.len() < limit {
        let present: HashSet<Thing> = scored.iter().map(|(id, _)| id.clone()).collect();
        let remaining: Vec<&Thing> = candidates.iter().filter(|c| !present.contains(*c)).collect();
        let missing = limit - scored.len();
        for id in remaining.choose_multiple(rng, missing) {
            scored.push(((*id).clone(), 0));
        }
    }
    scored.sort_by_key(|(_, score)| Reverse(*score));
    scored.into_iter().take(limit).map(|(id, _)| id).collect()
}

pub struct SuggestionService<'a> {
    user_repository: LocalUserDbService<'a>,
    follow_repository: FollowDbService<'a>,
    photo_repository: PhotoDbService<'a>,
}

impl<'a> SuggestionService<'a> {
    pub fn new(db: &'a Db, ctx: &'a Ctx) -> Self {
        SuggestionService {
            user_repository: LocalUserDbService { db, ctx },
            follow_repository: FollowDbService { db, ctx },
            photo_repository: PhotoDbService { db, ctx },
        }
    }

    /// Photographers `user` does not follow yet, best matches first.
    pub async fn suggest(&self, user: &LocalUser, limit: usize) -> CtxResult<Vec<LocalUser>> {
        let following = self.follow_repository.user_following_ids(&user.id).await?;
        let candidates = self
            .user_repository
            .photographer_candidates(&user.id, following.clone())
            .await?;
        if candidates.is_empty() {
            return Ok(vec![]);
        }

        let (popular, followed_by_following, uploads) = join!(
            self.follow_repository.follower_counts(),
            self.follow_repository.follower_counts_among(following),
            self.photo_repository.quality_uploads(),
        );

        let candidate_ids: HashSet<Thing> = candidates.iter().map(|u| u.id.clone()).collect();
        let take = limit * 2;
        let lists = vec![
            rank_by_count(popular?, &candidate_ids, take),
            rank_by_count(followed_by_following?, &candidate_ids, take),
            rank_by_latest(
                uploads?
                    .into_iter()
                    .map(|u| (u.user, u.upload_time))
                    .collect(),
                &candidate_ids,
                take,
            ),
        ];

        let ordered_ids: Vec<Thing> = candidates.iter().map(|u| u.id.clone()).collect();
        let ranked = finalize_ranking(
            merge_position_scores(&lists),
            &ordered_ids,
            limit,
            &mut rand::thread_rng(),
        );

        let mut by_id: HashMap<Thing, LocalUser> =
            candidates.into_iter().map(|u| (u.id.clone(), u)).collect();
        Ok(ranked.into_iter().filter_map(|id| by_id.remove(&id)).collect())
    }
}
