//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime};
use sea_orm::sea_query::{Alias, Expr, Query, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use blog_core::domain::{Comment, Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, TagRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// A tag row joined with the post it is attached to.
#[derive(Debug, FromQueryResult)]
struct PostTagRow {
    post_id: Uuid,
    id: Uuid,
    name: String,
    slug: String,
}

fn published() -> Select<PostEntity> {
    PostEntity::find().filter(post::Column::Status.eq(post::Status::Published))
}

fn published_with_tag(tag: Option<&Tag>) -> Select<PostEntity> {
    let query = published();
    match tag {
        Some(tag) => query.filter(
            post::Column::Id.in_subquery(
                Query::select()
                    .column(post_tag::Column::PostId)
                    .from(PostTagEntity)
                    .and_where(post_tag::Column::TagId.eq(tag.id))
                    .to_owned(),
            ),
        ),
        None => query,
    }
}

impl PostgresPostRepository {
    /// Attach author names and tags to post rows, keeping their order.
    async fn hydrate(&self, models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut author_ids: Vec<Uuid> = models.iter().map(|m| m.author_id).collect();
        author_ids.sort();
        author_ids.dedup();

        let rows = TagEntity::find()
            .column_as(post_tag::Column::PostId, "post_id")
            .join(JoinType::InnerJoin, tag::Relation::PostTag.def())
            .filter(post_tag::Column::PostId.is_in(post_ids))
            .order_by_asc(tag::Column::Name)
            .into_model::<PostTagRow>()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        let mut tags: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in rows {
            tags.entry(row.post_id).or_default().push(Tag {
                id: row.id,
                name: row.name,
                slug: row.slug,
            });
        }

        let authors: HashMap<Uuid, String> = UserEntity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .map_err(query_error)?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let author = authors.get(&m.author_id).cloned().unwrap_or_default();
                let post_tags = tags.remove(&m.id).unwrap_or_default();
                m.into_domain(author, post_tags)
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count_published(&self, tag: Option<&Tag>) -> Result<u64, RepoError> {
        published_with_tag(tag)
            .count(&self.db)
            .await
            .map_err(query_error)
    }

    async fn list_published(
        &self,
        tag: Option<&Tag>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let models = published_with_tag(tag)
            .order_by_desc(post::Column::Publish)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        self.hydrate(models).await
    }

    async fn find_published(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = published()
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(self.hydrate(model.into_iter().collect()).await?.pop())
    }

    async fn find_published_on(
        &self,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1);

        tracing::debug!(%date, slug, "Finding published post by date and slug");

        let model = published()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Publish.gte(start))
            .filter(post::Column::Publish.lt(end))
            .order_by_desc(post::Column::Publish)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(self.hydrate(model.into_iter().collect()).await?.pop())
    }

    async fn similar_to(&self, post: &Post, limit: u64) -> Result<Vec<Post>, RepoError> {
        let tag_ids: Vec<Uuid> = post.tags.iter().map(|t| t.id).collect();
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let same_tags: SimpleExpr = Expr::col(Alias::new("same_tags")).into();

        // (post id, shared tag count), best match first
        let ranked: Vec<(Uuid, i64)> = PostTagEntity::find()
            .select_only()
            .column(post_tag::Column::PostId)
            .column_as(
                Expr::col((PostTagEntity, post_tag::Column::TagId)).count(),
                "same_tags",
            )
            .join(JoinType::InnerJoin, post_tag::Relation::Post.def())
            .filter(post_tag::Column::TagId.is_in(tag_ids))
            .filter(post_tag::Column::PostId.ne(post.id))
            .filter(post::Column::Status.eq(post::Status::Published))
            .group_by(post_tag::Column::PostId)
            .group_by(post::Column::Publish)
            .order_by_desc(same_tags)
            .order_by_desc(post::Column::Publish)
            .limit(limit)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = ranked.iter().map(|(id, _)| *id).collect();
        let models = published()
            .filter(post::Column::Id.is_in(ids.clone()))
            .all(&self.db)
            .await
            .map_err(query_error)?;

        let mut posts = self.hydrate(models).await?;
        posts.sort_by_key(|p| ids.iter().position(|id| *id == p.id));

        Ok(posts)
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
