//! Line-oriented intents typed at the storefront prompt.

use boutique_core::{CategoryFilter, Msg, ProductId, SortMode};

pub const HELP: &str = "\
commands:
  cat <name|all>        filter by category
  search [text]         filter by title (empty clears)
  sort <none|price_asc|price_desc|rating>
  more | refresh | retry
  open <id> | close     product detail
  qty <n>               detail quantity
  add [<id> [qty]]      add the open product, or a listed one
  set <id> <qty>        cart quantity (0 removes)
  inc <id> | dec <id> | rm <id> | clear | checkout
  fav <id> | unfav <id>
  ok                    dismiss notice
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Msg(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("unknown sort `{0}`")]
    UnknownSort(String),
}

pub fn parse_line(line: &str) -> Result<Input, CommandError> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let msg = match command {
        "" => Msg::NoOp,
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => return Ok(Input::Quit),
        "cat" | "category" => {
            if rest.is_empty() {
                return Err(missing("cat", "a category name"));
            }
            Msg::CategorySelected(CategoryFilter::from_label(rest))
        }
        "search" => Msg::SearchChanged(rest.to_string()),
        "sort" => {
            let label = args.next().ok_or_else(|| missing("sort", "a sort mode"))?;
            let mode = SortMode::from_label(label)
                .ok_or_else(|| CommandError::UnknownSort(label.to_string()))?;
            Msg::SortChanged(mode)
        }
        "more" => Msg::LoadMoreRequested,
        "refresh" => Msg::RefreshRequested,
        "retry" => Msg::RetryRequested,
        "open" => Msg::ProductOpened(product_id(args.next(), "open")?),
        "close" | "back" => Msg::ProductClosed,
        "qty" => Msg::DetailQuantityChanged(number(args.next(), "qty", "a quantity")?),
        "add" => match args.next() {
            None => Msg::AddDetailToCart,
            Some(id) => Msg::AddToCart {
                product_id: product_id(Some(id), "add")?,
                quantity: match args.next() {
                    Some(quantity) => number(Some(quantity), "add", "a quantity")?,
                    None => 1,
                },
            },
        },
        "set" => Msg::CartQuantityChanged {
            product_id: product_id(args.next(), "set")?,
            quantity: number(args.next(), "set", "a quantity")?,
        },
        "inc" => Msg::CartItemIncremented(product_id(args.next(), "inc")?),
        "dec" => Msg::CartItemDecremented(product_id(args.next(), "dec")?),
        "rm" | "remove" => Msg::RemoveFromCart(product_id(args.next(), "rm")?),
        "clear" => Msg::ClearCart,
        "checkout" => Msg::CheckoutRequested,
        "fav" => Msg::FavoriteToggled(product_id(args.next(), "fav")?),
        "unfav" => Msg::RemoveFavorite(product_id(args.next(), "unfav")?),
        "ok" => Msg::NoticeDismissed,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Input::Msg(msg))
}

fn missing(command: &'static str, expected: &'static str) -> CommandError {
    CommandError::MissingArgument { command, expected }
}

fn product_id(arg: Option<&str>, command: &'static str) -> Result<ProductId, CommandError> {
    let arg = arg.ok_or_else(|| missing(command, "a product id"))?;
    arg.parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}

fn number(
    arg: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<i64, CommandError> {
    let arg = arg.ok_or_else(|| missing(command, expected))?;
    arg.parse()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn msg(line: &str) -> Msg {
        match parse_line(line) {
            Ok(Input::Msg(msg)) => msg,
            other => panic!("expected a message for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn category_names_keep_their_spaces() {
        assert_eq!(
            msg("cat men's clothing"),
            Msg::CategorySelected(CategoryFilter::Only("men's clothing".to_string()))
        );
        assert_eq!(msg("cat ALL"), Msg::CategorySelected(CategoryFilter::All));
    }

    #[test]
    fn bare_search_clears_the_filter() {
        assert_eq!(msg("search"), Msg::SearchChanged(String::new()));
        assert_eq!(msg("search red hat"), Msg::SearchChanged("red hat".to_string()));
    }

    #[test]
    fn add_defaults_to_one_or_the_open_product() {
        assert_eq!(msg("add"), Msg::AddDetailToCart);
        assert_eq!(
            msg("add 4"),
            Msg::AddToCart {
                product_id: 4,
                quantity: 1
            }
        );
        assert_eq!(
            msg("add 4 -2"),
            Msg::AddToCart {
                product_id: 4,
                quantity: -2
            }
        );
    }

    #[test]
    fn sort_labels_are_recognised() {
        assert_eq!(msg("sort price_desc"), Msg::SortChanged(SortMode::PriceDesc));
        assert_eq!(
            parse_line("sort cheapest"),
            Err(CommandError::UnknownSort("cheapest".to_string()))
        );
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert_eq!(
            parse_line("open"),
            Err(CommandError::MissingArgument {
                command: "open",
                expected: "a product id"
            })
        );
        assert_eq!(
            parse_line("inc seven"),
            Err(CommandError::NotANumber("seven".to_string()))
        );
        assert_eq!(
            parse_line("buy 3"),
            Err(CommandError::Unknown("buy".to_string()))
        );
    }

    #[test]
    fn control_words() {
        assert_eq!(parse_line("  quit "), Ok(Input::Quit));
        assert_eq!(parse_line("help"), Ok(Input::Help));
        assert_eq!(msg(""), Msg::NoOp);
    }
}
