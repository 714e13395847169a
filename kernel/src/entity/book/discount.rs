use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::BookTitle;

const SEPARATOR: &str = " -- ";
const SUFFIX: &str = "% discount!";

/// Discount annotation in percent.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookDiscount(i32);

impl BookDiscount {
    pub fn new(percentage: impl Into<i32>) -> Self {
        Self(percentage.into())
    }

    pub fn is_valid(&self) -> bool {
        (0..=100).contains(&self.0)
    }
}

/// `"{base} -- {p}% discount!"` when a discount is set, the base title otherwise.
pub fn render_title(title: &BookTitle, discount: Option<&BookDiscount>) -> String {
    let base: &String = title.as_ref();
    match discount {
        Some(discount) => format!("{base}{SEPARATOR}{}{SUFFIX}", discount.0),
        None => base.to_string(),
    }
}

/// Returns the base title if `title` ends with the suffix rendered for `discount`.
pub fn strip_discount<'a>(title: &'a str, discount: &BookDiscount) -> Option<&'a str> {
    title.strip_suffix(format!("{SEPARATOR}{}{SUFFIX}", discount.0).as_str())
}

#[cfg(test)]
mod test {
    use super::{render_title, strip_discount, BookDiscount};
    use crate::entity::BookTitle;

    #[test]
    fn renders_exact_suffix() {
        let title = BookTitle::new("The Raven");
        assert_eq!(
            render_title(&title, Some(&BookDiscount::new(11))),
            "The Raven -- 11% discount!"
        );
    }

    #[test]
    fn no_discount_keeps_base_title() {
        let title = BookTitle::new("Catweazle");
        assert_eq!(render_title(&title, None), "Catweazle");
    }

    #[test]
    fn stripping_undoes_rendering() {
        let title = BookTitle::new("Eleonora");
        let rendered = render_title(&title, Some(&BookDiscount::new(11)));
        let discount = BookDiscount::new(11);
        assert_eq!(strip_discount(&rendered, &discount), Some("Eleonora"));
        assert_eq!(BookTitle::from_display(rendered, Some(&discount)), title);
    }

    #[test]
    fn stripping_ignores_lookalikes() {
        let discount = BookDiscount::new(2);
        assert_eq!(strip_discount("Plain title", &discount), None);
        assert_eq!(strip_discount("Odd -- x% discount!", &discount), None);
        assert_eq!(strip_discount("Odd -- % discount!", &discount), None);
        assert_eq!(strip_discount("Odd -- 12% discount!", &discount), None);
    }

    #[test]
    fn stripping_needs_the_matching_discount() {
        let title = "Catweazle -- 2% discount!";
        assert_eq!(
            BookTitle::from_display(title, None),
            BookTitle::new("Catweazle -- 2% discount!")
        );
        assert_eq!(
            BookTitle::from_display(title, Some(&BookDiscount::new(11))),
            BookTitle::new("Catweazle -- 2% discount!")
        );
        assert_eq!(
            BookTitle::from_display(title, Some(&BookDiscount::new(2))),
            BookTitle::new("Catweazle")
        );
    }

    #[test]
    fn discount_range() {
        assert!(BookDiscount::new(0).is_valid());
        assert!(BookDiscount::new(100).is_valid());
        assert!(!BookDiscount::new(-1).is_valid());
        assert!(!BookDiscount::new(101).is_valid());
    }
}
