use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};

/// A model or association name, split into snake_case parts.
///
/// Inflection only touches the last part, so `blog_post` pluralizes to
/// `blog_posts`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = src.to_snake_case();
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    pub fn camel_case(&self) -> String {
        self.snake_case().to_lower_camel_case()
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn plural(&self) -> Self {
        self.map_last(pluralize)
    }

    pub fn singular(&self) -> Self {
        self.map_last(singularize)
    }

    fn map_last(&self, f: impl FnOnce(&str) -> String) -> Self {
        let mut parts = self.parts.clone();
        if let Some(last) = parts.last_mut() {
            *last = f(last);
        }
        Self { parts }
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.snake_case())
    }
}

pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}

pub fn singularize(word: &str) -> String {
    pluralizer::pluralize(word, 1, false)
}

/// Returns `true` when `word` is its own singular form.
///
/// Uncountable words such as `sheep` are reported as singular.
pub fn is_singular(word: &str) -> bool {
    singularize(word) == word
}
