//! Gallery Validation Pipeline
//!
//! Same shape as the user pipeline: ordered [`GalleryStep`]s, one driver,
//! first failure wins.

use std::sync::Arc;

use kernel::id::{GalleryId, UserId};

use crate::domain::entity::gallery::Gallery;
use crate::domain::repository::GalleryRepository;
use crate::error::{GalleryError, GalleryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryStep {
    UserIdRequired,
    TitleRequired,
    IdGreaterThanZero,
}

pub const CREATE_STEPS: &[GalleryStep] = &[GalleryStep::UserIdRequired, GalleryStep::TitleRequired];

pub const UPDATE_STEPS: &[GalleryStep] = &[GalleryStep::UserIdRequired, GalleryStep::TitleRequired];

pub const DELETE_STEPS: &[GalleryStep] = &[GalleryStep::IdGreaterThanZero];

/// Validation layer in front of a [`GalleryRepository`]
pub struct GalleryValidator<R>
where
    R: GalleryRepository,
{
    repo: Arc<R>,
}

impl<R> GalleryValidator<R>
where
    R: GalleryRepository + Sync,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn by_id(&self, id: GalleryId) -> GalleryResult<Gallery> {
        self.repo.by_id(id).await
    }

    pub async fn by_user_id(&self, user_id: UserId) -> GalleryResult<Vec<Gallery>> {
        self.repo.by_user_id(user_id).await
    }

    pub async fn create(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        Self::run(gallery, CREATE_STEPS)?;
        self.repo.create(gallery).await
    }

    pub async fn update(&self, gallery: &mut Gallery) -> GalleryResult<()> {
        Self::run(gallery, UPDATE_STEPS)?;
        gallery.record.touch();
        self.repo.update(gallery).await
    }

    pub async fn delete(&self, id: GalleryId) -> GalleryResult<()> {
        Self::run(&Gallery::with_id(id), DELETE_STEPS)?;
        self.repo.delete(id).await
    }

    /// Apply `steps` in order, stopping at the first error
    pub fn run(gallery: &Gallery, steps: &[GalleryStep]) -> GalleryResult<()> {
        steps.iter().try_for_each(|step| Self::apply(*step, gallery))
    }

    fn apply(step: GalleryStep, gallery: &Gallery) -> GalleryResult<()> {
        match step {
            GalleryStep::UserIdRequired if !gallery.user_id.is_assigned() => {
                Err(GalleryError::UserIdRequired)
            }
            GalleryStep::TitleRequired if gallery.title.is_empty() => {
                Err(GalleryError::TitleRequired)
            }
            GalleryStep::IdGreaterThanZero if !gallery.id().is_assigned() => {
                Err(GalleryError::IdInvalid)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryGalleryRepository;

    fn validator() -> GalleryValidator<MemoryGalleryRepository> {
        GalleryValidator::new(Arc::new(MemoryGalleryRepository::new()))
    }

    #[tokio::test]
    async fn test_create_requires_user_then_title() {
        let v = validator();

        let mut gallery = Gallery::new(UserId::default(), "");
        assert!(matches!(
            v.create(&mut gallery).await,
            Err(GalleryError::UserIdRequired)
        ));

        let mut gallery = Gallery::new(UserId::new(1), "");
        assert!(matches!(
            v.create(&mut gallery).await,
            Err(GalleryError::TitleRequired)
        ));

        let mut gallery = Gallery::new(UserId::new(1), "Trip");
        v.create(&mut gallery).await.unwrap();
        assert!(gallery.id().is_assigned());
    }

    #[tokio::test]
    async fn test_update_requires_title() {
        let v = validator();
        let mut gallery = Gallery::new(UserId::new(1), "Trip");
        v.create(&mut gallery).await.unwrap();

        gallery.title.clear();
        assert!(matches!(
            v.update(&mut gallery).await,
            Err(GalleryError::TitleRequired)
        ));
        assert_eq!(v.by_id(gallery.id()).await.unwrap().title, "Trip");
    }

    #[tokio::test]
    async fn test_delete_requires_positive_id() {
        let v = validator();
        assert!(matches!(
            v.delete(GalleryId::new(0)).await,
            Err(GalleryError::IdInvalid)
        ));
    }
}
