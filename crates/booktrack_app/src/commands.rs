use anyhow::Context;
use booktrack_client::{BookTrackClient, SearchQuery, DEFAULT_PAGE_SIZE};
use booktrack_core::{Book, BookId, Page};
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session.
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account (does not log in).
    Register {
        username: String,
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is logged in.
    Whoami,
    /// Search the catalog.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// List the top-rated books.
    Top10,
    /// Show one book.
    Show { id: BookId },
    /// List your favorites.
    Favorites,
    /// Add or remove a favorite.
    Toggle { id: BookId },
}

pub async fn run(client: &BookTrackClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            client
                .session()
                .login(&username, &password)
                .await
                .context("login")?;
            println!("Logged in as {username}");
        }
        Command::Register {
            username,
            email,
            password,
        } => {
            client
                .session()
                .register(&username, &email, &password)
                .await
                .context("register")?;
            println!("Registered {username}; log in to continue");
        }
        Command::Logout => {
            client.session().logout();
            println!("Logged out");
        }
        Command::Whoami => match client.session().current_user() {
            Some(user) => println!("{user}"),
            None => println!("Not logged in"),
        },
        Command::Search { query, page, size } => {
            let catalog = client.catalog();
            catalog
                .search(SearchQuery { query, page, size })
                .await
                .context("search")?;
            print_page(&catalog.current_page());
        }
        Command::Top10 => {
            let catalog = client.catalog();
            catalog.fetch_top10().await.context("top10")?;
            for (rank, book) in catalog.top10().iter().enumerate() {
                println!("{:>2}. {}", rank + 1, book_line(book));
            }
        }
        Command::Show { id } => {
            let catalog = client.catalog();
            catalog
                .fetch_details(id)
                .await
                .with_context(|| format!("book {id}"))?;
            if let Some(book) = catalog.selected() {
                print_details(&book);
            }
        }
        Command::Favorites => {
            let favorites = client.favorites();
            favorites.fetch_favorites().await.context("favorites")?;
            print_books(&favorites.items());
        }
        Command::Toggle { id } => {
            let favorites = client.favorites();
            favorites
                .toggle_favorite(id)
                .await
                .with_context(|| format!("toggle favorite {id}"))?;
            let verb = if favorites.contains(id) { "Added" } else { "Removed" };
            println!("{verb} book {id}");
        }
    }
    Ok(())
}

fn book_line(book: &Book) -> String {
    format!(
        "#{} {} by {} ({:.1})",
        book.id, book.title, book.author, book.rating
    )
}

fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("(none)");
    }
    for book in books {
        println!("{}", book_line(book));
    }
}

fn print_page(page: &Page<Book>) {
    print_books(&page.content);
    println!(
        "page {} of {} ({} books)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
}

fn print_details(book: &Book) {
    println!("{}", book.title);
    println!("  author: {}", book.author);
    println!("  isbn:   {}", book.isbn);
    println!("  rating: {:.1}", book.rating);
    println!();
    println!("{}", book.summary);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_line_rounds_rating() {
        let book = Book {
            id: 3,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            summary: String::new(),
            rating: 4.76,
            isbn: "9780441013593".to_string(),
        };

        assert_eq!(book_line(&book), "#3 Dune by Frank Herbert (4.8)");
    }
}
