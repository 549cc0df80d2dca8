//! Field extraction from rendered page fragments.
//!
//! The crawler reads a container's inner HTML from the live page and hands it
//! to [`FieldExtractor`], which applies the configured CSS selectors. Fields
//! the page layout guarantees are required: a missing node is a
//! [`CrawlError::StructuralExtraction`], never a silent default.

use crate::error::{CrawlError, Result};
use crate::url_builder::resolve_link;
use feedharvest_core::{AuthorProfile, FeedItem, NoteDetail, SelectorConfig};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Logical fields the extractor knows how to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    AuthorName,
    AuthorLink,
    CoverLink,
    AuthorDesc,
    AuthorFollows,
    AuthorFollowing,
    AuthorLikesAndCollects,
    NoteCollects,
    NoteComments,
    NoteLikes,
    NoteDate,
    NoteContent,
    NoteTags,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::AuthorName => "author_name",
            Self::AuthorLink => "author_link",
            Self::CoverLink => "note_link",
            Self::AuthorDesc => "author_desc",
            Self::AuthorFollows => "author_follows",
            Self::AuthorFollowing => "author_following",
            Self::AuthorLikesAndCollects => "author_likes_and_collects",
            Self::NoteCollects => "note_collects",
            Self::NoteComments => "note_comments",
            Self::NoteLikes => "note_likes",
            Self::NoteDate => "note_date",
            Self::NoteContent => "note_content",
            Self::NoteTags => "tags",
        }
    }
}

struct CompiledSelector {
    source: String,
    selector: Selector,
}

impl CompiledSelector {
    fn parse(field: &'static str, source: &str) -> Result<Self> {
        let selector = Selector::parse(source).map_err(|e| CrawlError::InvalidSelector {
            field,
            reason: format!("`{source}`: {e}"),
        })?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }
}

/// Text content of an element, trimmed.
fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text content with every text node trimmed before joining.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// Remove the topic boilerplate and `#` markers from a tag label.
pub fn clean_tag(raw: &str, boilerplate: &str) -> String {
    let without_boilerplate = if boilerplate.is_empty() {
        raw.to_string()
    } else {
        raw.replace(boilerplate, "")
    };
    without_boilerplate.replace('#', "").trim().to_string()
}

/// Applies configured selectors to rendered HTML fragments.
pub struct FieldExtractor {
    base_url: Url,
    feed_item: CompiledSelector,
    title: CompiledSelector,
    author_name: CompiledSelector,
    author_link: CompiledSelector,
    cover_link: CompiledSelector,
    author_desc: CompiledSelector,
    author_follows: CompiledSelector,
    author_following: CompiledSelector,
    author_likes_and_collects: CompiledSelector,
    note_collects: CompiledSelector,
    note_comments: CompiledSelector,
    note_likes: CompiledSelector,
    note_date: CompiledSelector,
    note_content: CompiledSelector,
    note_tags: CompiledSelector,
    disabled_marker: String,
    tag_boilerplate: String,
}

impl FieldExtractor {
    /// Compile every selector up front so a typo fails before the browser opens.
    pub fn new(selectors: &SelectorConfig, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CrawlError::InvalidLink {
            href: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url,
            feed_item: CompiledSelector::parse("feed_item", &selectors.feed_item)?,
            title: CompiledSelector::parse(Field::Title.name(), &selectors.title)?,
            author_name: CompiledSelector::parse(Field::AuthorName.name(), &selectors.author_name)?,
            author_link: CompiledSelector::parse(Field::AuthorLink.name(), &selectors.author_link)?,
            cover_link: CompiledSelector::parse(Field::CoverLink.name(), &selectors.cover_link)?,
            author_desc: CompiledSelector::parse(Field::AuthorDesc.name(), &selectors.author_desc)?,
            author_follows: CompiledSelector::parse(
                Field::AuthorFollows.name(),
                &selectors.author_follows,
            )?,
            author_following: CompiledSelector::parse(
                Field::AuthorFollowing.name(),
                &selectors.author_following,
            )?,
            author_likes_and_collects: CompiledSelector::parse(
                Field::AuthorLikesAndCollects.name(),
                &selectors.author_likes_and_collects,
            )?,
            note_collects: CompiledSelector::parse(
                Field::NoteCollects.name(),
                &selectors.note_collects,
            )?,
            note_comments: CompiledSelector::parse(
                Field::NoteComments.name(),
                &selectors.note_comments,
            )?,
            note_likes: CompiledSelector::parse(Field::NoteLikes.name(), &selectors.note_likes)?,
            note_date: CompiledSelector::parse(Field::NoteDate.name(), &selectors.note_date)?,
            note_content: CompiledSelector::parse(
                Field::NoteContent.name(),
                &selectors.note_content,
            )?,
            note_tags: CompiledSelector::parse(Field::NoteTags.name(), &selectors.note_tags)?,
            disabled_marker: selectors.disabled_marker.clone(),
            tag_boilerplate: selectors.tag_boilerplate.clone(),
        })
    }

    fn compiled(&self, field: Field) -> &CompiledSelector {
        match field {
            Field::Title => &self.title,
            Field::AuthorName => &self.author_name,
            Field::AuthorLink => &self.author_link,
            Field::CoverLink => &self.cover_link,
            Field::AuthorDesc => &self.author_desc,
            Field::AuthorFollows => &self.author_follows,
            Field::AuthorFollowing => &self.author_following,
            Field::AuthorLikesAndCollects => &self.author_likes_and_collects,
            Field::NoteCollects => &self.note_collects,
            Field::NoteComments => &self.note_comments,
            Field::NoteLikes => &self.note_likes,
            Field::NoteDate => &self.note_date,
            Field::NoteContent => &self.note_content,
            Field::NoteTags => &self.note_tags,
        }
    }

    fn find<'a>(&self, scope: ElementRef<'a>, field: Field) -> Option<ElementRef<'a>> {
        scope.select(&self.compiled(field).selector).next()
    }

    fn require<'a>(&self, scope: ElementRef<'a>, field: Field) -> Result<ElementRef<'a>> {
        self.find(scope, field)
            .ok_or_else(|| CrawlError::missing(field.name(), &self.compiled(field).source))
    }

    fn link(&self, scope: ElementRef<'_>, field: Field) -> Result<String> {
        let href = self
            .require(scope, field)?
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or_else(|| CrawlError::missing(field.name(), &self.compiled(field).source))?;
        resolve_link(&self.base_url, href)
    }

    /// Counter text, or `None` when the element carries the disabled marker.
    fn counter(&self, scope: ElementRef<'_>, field: Field) -> Result<Option<String>> {
        let element = self.require(scope, field)?;
        if element.value().attr(&self.disabled_marker).is_some() {
            return Ok(None);
        }
        Ok(Some(text(element)))
    }

    /// Text of the first node matching `field` in `html`, or `None` if absent.
    pub fn text(&self, html: &str, field: Field) -> Option<String> {
        let fragment = Html::parse_fragment(html);
        self.find(fragment.root_element(), field).map(text)
    }

    /// Every feed card in the feed container's HTML, in page order.
    ///
    /// A card without an author name, author link or cover link fails the
    /// whole call.
    pub fn feed_items(&self, html: &str) -> Result<Vec<FeedItem>> {
        let fragment = Html::parse_fragment(html);
        fragment
            .root_element()
            .select(&self.feed_item.selector)
            .map(|card| {
                Ok(FeedItem {
                    title: self.find(card, Field::Title).map(text).unwrap_or_default(),
                    author_name: text(self.require(card, Field::AuthorName)?),
                    author_link: self.link(card, Field::AuthorLink)?,
                    note_link: self.link(card, Field::CoverLink)?,
                })
            })
            .collect()
    }

    /// Author page fields; the description may be absent, the counters may not.
    pub fn author_profile(&self, html: &str) -> Result<AuthorProfile> {
        let fragment = Html::parse_fragment(html);
        let root = fragment.root_element();

        Ok(AuthorProfile {
            desc: self.find(root, Field::AuthorDesc).map(text).unwrap_or_default(),
            follows: text(self.require(root, Field::AuthorFollows)?),
            following: text(self.require(root, Field::AuthorFollowing)?),
            likes_and_collects: text(self.require(root, Field::AuthorLikesAndCollects)?),
        })
    }

    /// Note page fields.
    pub fn note_detail(&self, html: &str) -> Result<NoteDetail> {
        let fragment = Html::parse_fragment(html);
        let root = fragment.root_element();

        let tags = root
            .select(&self.note_tags.selector)
            .map(|tag| clean_tag(&stripped_text(tag), &self.tag_boilerplate))
            .collect();

        Ok(NoteDetail {
            collects: self.counter(root, Field::NoteCollects)?,
            comments: self.counter(root, Field::NoteComments)?,
            likes: self.counter(root, Field::NoteLikes)?,
            date: text(self.require(root, Field::NoteDate)?),
            content: text(self.require(root, Field::NoteContent)?),
            tags,
        })
    }
}
