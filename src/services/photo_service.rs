use chrono::Utc;
use tracing::{info, warn};

use crate::{
    database::client::Db,
    entities::{
        photo::{
            photo_entity::{CreatePhoto, Photo, PhotoDbService},
            photo_tag_entity::PhotoTagDbService,
        },
        user_auth::{
            follow_entity::FollowDbService,
            local_user_entity::{LocalUser, LocalUserDbService},
        },
    },
    interfaces::{file_storage::FileStorageInterface, tag_suggester::TagSuggesterInterface},
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
        utils::db_utils::Pagination,
    },
    models::view::photo::{PhotoView, PhotoWithTags, TagSuggestionView},
    utils::{
        file::convert::{unique_file_name, FileUpload},
        validate_utils::normalize_tags,
    },
};

pub const MAX_SUGGESTED_TAGS: usize = 10;
pub const MAX_SELECTED_TAGS: usize = 5;

pub struct PhotoCreateInput {
    pub caption: Option<String>,
    pub selected_tags: Vec<String>,
    pub file: FileUpload,
}

pub struct PhotoService<'a, F, S>
where
    F: FileStorageInterface + Send + Sync + ?Sized,
    S: TagSuggesterInterface + Send + Sync + ?Sized,
{
    ctx: &'a Ctx,
    photo_repository: PhotoDbService<'a>,
    tag_repository: PhotoTagDbService<'a>,
    follow_repository: FollowDbService<'a>,
    user_repository: LocalUserDbService<'a>,
    file_storage: &'a F,
    tag_suggester: &'a S,
}

impl<'a, F, S> PhotoService<'a, F, S>
where
    F: FileStorageInterface + Send + Sync + ?Sized,
    S: TagSuggesterInterface + Send + Sync + ?Sized,
{
    pub fn new(db: &'a Db, ctx: &'a Ctx, file_storage: &'a F, tag_suggester: &'a S) -> Self {
        PhotoService {
            ctx,
            photo_repository: PhotoDbService { db, ctx },
            tag_repository: PhotoTagDbService { db, ctx },
            follow_repository: FollowDbService { db, ctx },
            user_repository: LocalUserDbService { db, ctx },
            file_storage,
            tag_suggester,
        }
    }

    pub async fn suggest_tags(&self, file: FileUpload) -> CtxResult<TagSuggestionView> {
        let analysis = self
            .tag_suggester
            .analyze(&file.data, file.content_type.as_deref())
            .await
            .map_err(|source| {
                warn!("->> tag suggestion failed for {}: {source}", file.file_name);
                self.ctx.to_ctx_error(AppError::TagSuggestion { source })
            })?;

        let mut suggestions = normalize_tags(&analysis.tags);
        suggestions.truncate(MAX_SUGGESTED_TAGS);
        Ok(TagSuggestionView {
            suggestions,
            captions: analysis.captions,
        })
    }

    pub async fn create(&self, user: &LocalUser, input: PhotoCreateInput) -> CtxResult<PhotoView> {
        let tags = normalize_tags(&input.selected_tags);
        if tags.len() > MAX_SELECTED_TAGS {
            return Err(self.ctx.to_ctx_error(AppError::Generic {
                description: format!("Max {MAX_SELECTED_TAGS} tags"),
            }));
        }

        let filename = unique_file_name(&input.file.file_name);
        self.file_storage
            .save(&filename, input.file.data)
            .await
            .map_err(|source| self.ctx.to_ctx_error(AppError::FileStorage { source }))?;

        let caption = input
            .caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let stored = self.store_photo(user, &filename, caption, tags).await;
        match stored {
            Ok(photo) => {
                info!("->> photo {} uploaded by {}", photo.id, user.username);
                Ok(photo)
            }
            Err(err) => {
                if let Err(e) = self.file_storage.remove(&filename).await {
                    warn!("->> could not remove {filename} after failed create: {e}");
                }
                Err(err)
            }
        }
    }

    async fn store_photo(
        &self,
        user: &LocalUser,
        filename: &str,
        caption: Option<String>,
        tags: Vec<String>,
    ) -> CtxResult<PhotoView> {
        let photo = self
            .photo_repository
            .create(CreatePhoto {
                user: user.id.clone(),
                filename: filename.to_string(),
                caption,
                upload_date: Utc::now().date_naive().to_string(),
            })
            .await?;
        self.tag_repository.add_tags(&photo.id, tags).await?;
        let view: PhotoWithTags = self.photo_repository.get_view(&photo.id).await?;
        Ok(view.into())
    }

    pub async fn get_view(&self, photo_id: &str) -> CtxResult<PhotoView> {
        let photo = self.photo_repository.get_thing(photo_id)?;
        let view: PhotoWithTags = self.photo_repository.get_view(&photo).await?;
        Ok(view.into())
    }

    /// File content of the photo; counts the download.
    pub async fn download(&self, photo_id: &str) -> CtxResult<(Photo, Vec<u8>)> {
        let photo = self.photo_repository.get_by_id(photo_id).await?;
        let bytes = self
            .file_storage
            .read(&photo.filename)
            .await
            .map_err(|e| {
                warn!("->> file {} of photo {} missing: {e}", photo.filename, photo.id);
                self.ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                    ident: "File".to_string(),
                })
            })?;
        let photo = self
            .photo_repository
            .increase_download_count(&photo.id)
            .await?;
        Ok((photo, bytes))
    }

    /// Photos of the users `user` follows, newest first.
    pub async fn feed(&self, user: &LocalUser, pagination: &Pagination) -> CtxResult<Vec<PhotoView>> {
        let following = self.follow_repository.user_following_ids(&user.id).await?;
        let photos: Vec<PhotoWithTags> = self
            .photo_repository
            .get_by_users(following, pagination)
            .await?;
        Ok(photos.into_iter().map(PhotoView::from).collect())
    }

    pub async fn user_photos(&self, user_id: &str, pagination: &Pagination) -> CtxResult<Vec<PhotoView>> {
        let user = self.user_repository.get_by_id(user_id).await?;
        let photos: Vec<PhotoWithTags> = self
            .photo_repository
            .get_by_user(&user.id, pagination)
            .await?;
        Ok(photos.into_iter().map(PhotoView::from).collect())
    }

    pub async fn search(&self, query: &str, pagination: &Pagination) -> CtxResult<Vec<PhotoView>> {
        let photos: Vec<PhotoWithTags> = self
            .photo_repository
            .search_by_tag(query, pagination)
            .await?;
        Ok(photos.into_iter().map(PhotoView::from).collect())
    }

    pub async fn list(&self) -> CtxResult<Vec<PhotoView>> {
        let photos: Vec<PhotoWithTags> = self.photo_repository.list_view().await?;
        Ok(photos.into_iter().map(PhotoView::from).collect())
    }

    /// Removes the photo, its attached records and the stored file.
    pub async fn delete(&self, photo_id: &str) -> CtxResult<()> {
        let photo = self.photo_repository.get_by_id(photo_id).await?;
        self.photo_repository.delete_cascade(&photo.id).await?;
        self.remove_file(&photo.filename).await;
        Ok(())
    }

    /// Removes the user with everything attached and their stored files.
    pub async fn delete_user(&self, user_id: &str) -> CtxResult<()> {
        let user = self.user_repository.get_by_id(user_id).await?;
        let filenames = self.photo_repository.user_filenames(&user.id).await?;
        self.user_repository.delete_cascade(&user.id).await?;
        for filename in filenames {
            self.remove_file(&filename).await;
        }
        info!("->> deleted user {}", user.username);
        Ok(())
    }

    async fn remove_file(&self, filename: &str) {
        if let Err(e) = self.file_storage.remove(filename).await {
            warn!("->> could not remove stored file {filename}: {e}");
        }
    }
}
