use chrono::NaiveDate;
use surrealdb::sql::Thing;
use tracing::info;

use crate::{
    database::client::Db,
    entities::photo::{
        best_photo_entity::BestPhotoDbService, comment_entity::CommentDbService,
        photo_entity::PhotoDbService, rating_entity::RatingDbService,
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
    },
    models::view::photo::{BestPhotoView, PhotoWithTags},
};

const RATING_WEIGHT: f64 = 2.0;
const COMMENT_WEIGHT: f64 = 0.5;
const DOWNLOAD_WEIGHT: f64 = 0.2;

pub fn photo_score(avg_rating: f64, comment_count: i64, download_count: i64) -> f64 {
    avg_rating * RATING_WEIGHT
        + comment_count as f64 * COMMENT_WEIGHT
        + download_count as f64 * DOWNLOAD_WEIGHT
}

/// First entry with the strictly highest score.
pub fn pick_best<T>(scored: impl IntoIterator<Item = (T, f64)>) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for (item, score) in scored {
        match &best {
            Some((_, best_score)) if score <= *best_score => {}
            _ => best = Some((item, score)),
        }
    }
    best.map(|(item, _)| item)
}

pub struct BestPhotoService<'a> {
    ctx: &'a Ctx,
    photo_repository: PhotoDbService<'a>,
    comment_repository: CommentDbService<'a>,
    rating_repository: RatingDbService<'a>,
    best_photo_repository: BestPhotoDbService<'a>,
}

impl<'a> BestPhotoService<'a> {
    pub fn new(db: &'a Db, ctx: &'a Ctx) -> Self {
        BestPhotoService {
            ctx,
            photo_repository: PhotoDbService { db, ctx },
            comment_repository: CommentDbService { db, ctx },
            rating_repository: RatingDbService { db, ctx },
            best_photo_repository: BestPhotoDbService { db, ctx },
        }
    }

    /// Stored winner of `date`, computed and stored when missing.
    pub async fn get_or_calculate(&self, date: NaiveDate) -> CtxResult<BestPhotoView> {
        let date_str = date.to_string();
        let photo = match self.best_photo_repository.get_by_date(&date_str).await? {
            Some(best) => best.photo,
            None => self.calculate_and_store(&date_str).await?.ok_or_else(|| {
                self.ctx.to_ctx_error(AppError::NotFound {
                    description: "No photos available for today".to_string(),
                })
            })?,
        };

        let view: PhotoWithTags = self.photo_repository.get_view(&photo).await?;
        Ok(BestPhotoView {
            date: date_str,
            photo: view.into(),
        })
    }

    pub async fn calculate_and_store(&self, date: &str) -> CtxResult<Option<Thing>> {
        let photos = self.photo_repository.get_by_upload_date(date).await?;

        let mut scored: Vec<(Thing, f64)> = Vec::with_capacity(photos.len());
        for photo in photos {
            let avg_rating = self.rating_repository.average_by_photo(&photo.id).await?;
            let comment_count = self.comment_repository.count_by_photo(&photo.id).await?;
            let score = photo_score(avg_rating, comment_count, photo.download_count);
            scored.push((photo.id, score));
        }

        let Some(best) = pick_best(scored) else {
            return Ok(None);
        };
        self.best_photo_repository.upsert(date, &best).await?;
        info!("->> best photo of {date}: {best}");
        Ok(Some(best))
    }
}
