//! Interactive input.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use jobscout_auth::Credentials;
use jobscout_core::SearchQuery;

/// Terminal prompts, skipped where the value came from a flag.
pub struct Prompter {
    assume_yes: bool,
    theme: ColorfulTheme,
}

impl Prompter {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            theme: ColorfulTheme::default(),
        }
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let username: String = Input::with_theme(&self.theme)
            .with_prompt("Email")
            .interact_text()?;
        let password = Password::with_theme(&self.theme)
            .with_prompt("Password")
            .interact()?;
        Ok(Credentials::new(username, password)?)
    }

    /// Build the search query, asking for whatever was not passed as a flag.
    pub fn search_query(
        &self,
        keywords: Option<&str>,
        location: Option<&str>,
        pages: Option<u32>,
    ) -> Result<SearchQuery> {
        let keywords = match keywords {
            Some(k) => k.to_string(),
            None => Input::with_theme(&self.theme)
                .with_prompt("Enter your job search keywords")
                .interact_text()?,
        };
        let location = match location {
            Some(l) => l.to_string(),
            None => Input::with_theme(&self.theme)
                .with_prompt("Enter your job search location")
                .allow_empty(true)
                .interact_text()?,
        };
        // Input<u32> re-asks until the answer parses
        let pages = match pages {
            Some(p) => p,
            None => Input::<u32>::with_theme(&self.theme)
                .with_prompt("Enter number of pages to scrape (0 for all)")
                .interact_text()?,
        };

        Ok(SearchQuery::new(keywords, location, pages)?)
    }

    /// Yes/no question; `--yes` answers yes without asking.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            println!("{} {}", prompt, style("yes").dim());
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact()?)
    }
}

pub fn print_header(msg: &str) {
    println!();
    println!("{}", style(format!("{:->10} {msg} {:-<10}", "", "")).bold());
}

pub fn print_success(msg: &str) {
    println!("{}", style(msg).green());
}

pub fn print_warning(msg: &str) {
    println!("{}", style(msg).yellow());
}
