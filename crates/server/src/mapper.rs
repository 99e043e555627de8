use service::review::Review;

use crate::dtos::ReviewDto;
use crate::validation::{Validate, ValidationErrors};

/// Translates between a domain entity and its wire object.
pub trait DtoMapper<E, D>: Send + Sync {
    fn to_dto(&self, entity: E) -> D;
    fn to_entity(&self, dto: D) -> Result<E, ValidationErrors>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReviewDtoMapper;

impl DtoMapper<Review, ReviewDto> for ReviewDtoMapper {
    fn to_dto(&self, r: Review) -> ReviewDto {
        ReviewDto {
            id: r.id,
            created_at: r.created_at,
            updated_at: r.updated_at,
            pos_id: Some(r.pos_id),
            author_id: Some(r.author_id),
            review: Some(r.review),
            approved: r.approved,
            approved_by: r.approved_by,
        }
    }

    fn to_entity(&self, dto: ReviewDto) -> Result<Review, ValidationErrors> {
        dto.validate()?;
        let (Some(pos_id), Some(author_id), Some(review)) = (dto.pos_id, dto.author_id, dto.review) else {
            return Err(ValidationErrors::single("review", "incomplete payload"));
        };
        Ok(Review {
            id: dto.id,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            pos_id,
            author_id,
            review,
            approved: dto.approved,
            approved_by: dto.approved_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> ReviewDto {
        ReviewDto {
            pos_id: Some(1),
            author_id: Some(7),
            review: Some("Great coffee".into()),
            approved: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn round_trip_keeps_payload_fields() {
        let m = ReviewDtoMapper;
        let input = dto();
        let back = m.to_dto(m.to_entity(input.clone()).unwrap());
        assert_eq!(back, input);
    }

    #[test]
    fn invalid_payload_is_not_mapped() {
        let m = ReviewDtoMapper;
        let bad = ReviewDto { review: Some("".into()), ..dto() };
        assert!(m.to_entity(bad).is_err());
        let missing = ReviewDto { pos_id: None, ..dto() };
        assert!(m.to_entity(missing).is_err());
    }
}
