use serde::{Deserialize, Serialize};

use crate::models::{Relation, Strategy};

/// Display language for labels and notices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

/// Fixed UI strings the core emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    ResultsSubtitle,
    NoResults,
    NoRating,
    KeywordsEmpty,
    KeywordsFailed,
    BookAdded,
    BookRemoved,
    BookExists,
    BookNotFound,
    AddFailed,
    InputBook,
    SelectBook,
    SelectRelation,
    ConfirmClear,
    Cleared,
    KeywordsSelected,
    KeywordsCleared,
    RecommendSuccess,
    RecommendBooks,
    RecommendFailed,
}

impl Locale {
    pub fn label(self, label: Label) -> &'static str {
        match self {
            Locale::Zh => match label {
                Label::ResultsSubtitle => "基于你的阅读偏好，我们为你精选了以下书籍",
                Label::NoResults => "暂时没有找到合适的推荐",
                Label::NoRating => "暂无评分",
                Label::KeywordsEmpty => "还没有添加喜欢的书籍",
                Label::KeywordsFailed => "加载关键词失败",
                Label::BookAdded => "已添加",
                Label::BookRemoved => "已移除",
                Label::BookExists => "该书籍已添加",
                Label::BookNotFound => "未找到该书籍",
                Label::AddFailed => "添加失败，请重试",
                Label::InputBook => "请输入书名",
                Label::SelectBook => "请至少添加一本喜欢的书籍",
                Label::SelectRelation => "请至少选择一种关系类型",
                Label::ConfirmClear => "确定要清空所有书籍吗？",
                Label::Cleared => "已清空所有书籍",
                Label::KeywordsSelected => "已全选关键词",
                Label::KeywordsCleared => "已清空选择",
                Label::RecommendSuccess => "为您推荐了",
                Label::RecommendBooks => "本书",
                Label::RecommendFailed => "推荐失败，请稍后重试",
            },
            Locale::En => match label {
                Label::ResultsSubtitle => {
                    "Based on your reading preferences, we have selected the following books"
                }
                Label::NoResults => "No suitable recommendations found",
                Label::NoRating => "No rating",
                Label::KeywordsEmpty => "No favorite books added yet",
                Label::KeywordsFailed => "Failed to load keywords",
                Label::BookAdded => "Added",
                Label::BookRemoved => "Removed",
                Label::BookExists => "This book has already been added",
                Label::BookNotFound => "Book not found",
                Label::AddFailed => "Failed to add, please retry",
                Label::InputBook => "Please enter a book title",
                Label::SelectBook => "Please add at least one favorite book",
                Label::SelectRelation => "Please select at least one relation type",
                Label::ConfirmClear => "Are you sure you want to clear all books?",
                Label::Cleared => "All books cleared",
                Label::KeywordsSelected => "All keywords selected",
                Label::KeywordsCleared => "Selection cleared",
                Label::RecommendSuccess => "Recommended",
                Label::RecommendBooks => "books for you",
                Label::RecommendFailed => "Recommendation failed, please try again later",
            },
        }
    }

    pub fn strategy_name(self, strategy: Strategy) -> &'static str {
        match (self, strategy) {
            (Locale::Zh, Strategy::Mixed) => "混合推荐",
            (Locale::Zh, Strategy::KgOnly) => "知识图谱",
            (Locale::Zh, Strategy::KeywordOnly) => "内容相似",
            (Locale::En, Strategy::Mixed) => "Mixed",
            (Locale::En, Strategy::KgOnly) => "Knowledge Graph",
            (Locale::En, Strategy::KeywordOnly) => "Content Similarity",
        }
    }

    pub fn relation_name(self, relation: Relation) -> &'static str {
        match (self, relation) {
            (Locale::Zh, Relation::Series) => "系列",
            (Locale::Zh, Relation::Author) => "作者",
            (Locale::Zh, Relation::Translator) => "译者",
            (Locale::Zh, Relation::Publisher) => "出版社",
            (Locale::En, Relation::Series) => "Series",
            (Locale::En, Relation::Author) => "Author",
            (Locale::En, Relation::Translator) => "Translator",
            (Locale::En, Relation::Publisher) => "Publisher",
        }
    }

    /// Separator between relation names in the results subtitle
    pub fn list_separator(self) -> &'static str {
        match self {
            Locale::Zh => "、",
            Locale::En => ", ",
        }
    }

    /// Joins a label and a quoted book title the way the locale writes it
    pub fn with_title(self, label: Label, name: &str) -> String {
        match self {
            Locale::Zh => format!("{}《{}》", self.label(label), name),
            Locale::En => format!("{} \"{}\"", self.label(label), name),
        }
    }

    /// Display text for a rating; absent and non-positive ratings read as unrated
    pub fn rating_text(self, rating: Option<f64>) -> String {
        match rating.filter(|r| *r > 0.0) {
            Some(rating) => format!("{:.1}", rating),
            None => self.label(Label::NoRating).to_string(),
        }
    }
}
