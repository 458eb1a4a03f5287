use crate::command::{context, ensure_done, finish, parse_choice, print_table};
use clap::{Parser, Subcommand};
use evrent_client::forms::CustomerUpdateForm;
use evrent_client::screens::CustomersScreen;
use evrent_client::settings::Settings;
use eyre::{eyre, Result};

#[derive(Parser, Debug)]
pub struct ListCmd {
    /// Matches name, phone or email
    #[arg(long, short, default_value = "")]
    pub search: String,
    /// true, false or all
    #[arg(long, default_value = "all")]
    pub verified: String,
    /// true, false or all
    #[arg(long, default_value = "all")]
    pub active: String,
}

#[derive(Parser, Debug)]
pub struct EditCmd {
    pub id: String,
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    List(ListCmd),
    /// Lock or unlock a renter
    Toggle { id: String },
    /// Mark the identity document as verified
    Verify { id: String },
    Edit(EditCmd),
}

impl Cmd {
    pub(crate) async fn run(self, settings: &Settings) -> Result<()> {
        let mut screen = CustomersScreen::new(context(settings)?);
        screen.load().await;

        match self {
            Self::List(cmd) => {
                screen.search = cmd.search;
                screen.verified = parse_choice(&cmd.verified)?;
                screen.status = parse_choice(&cmd.active)?;

                let rows: Vec<Vec<String>> = screen
                    .visible()
                    .into_iter()
                    .map(|x| {
                        vec![
                            x.id.clone(),
                            x.full_name.clone(),
                            x.email.clone(),
                            x.phone.clone(),
                            if x.is_verified() { "Đã xác minh" } else { "Chưa xác minh" }.into(),
                            x.status_label().into(),
                            screen.document_url(x).unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                print_table(
                    &["ID", "Họ tên", "Email", "SĐT", "Giấy tờ", "Trạng thái", "Tài liệu"],
                    &rows,
                );

                let stats = screen.stats();
                println!(
                    "\nTổng: {}  Đã xác minh: {}  Hoạt động: {}  Đã khóa: {}",
                    stats.total, stats.verified, stats.active, stats.locked
                );
                Ok(())
            }
            Self::Toggle { id } => ensure_done(screen.toggle_status(&id).await),
            Self::Verify { id } => ensure_done(screen.verify(&id).await),
            Self::Edit(cmd) => {
                let user = screen
                    .find(&cmd.id)
                    .ok_or_else(|| eyre!("No renter with id {}", cmd.id))?;
                let mut form = CustomerUpdateForm::from(user);
                form.full_name = cmd.full_name.unwrap_or(form.full_name);
                form.email = cmd.email.unwrap_or(form.email);
                form.phone = cmd.phone.unwrap_or(form.phone);
                finish(screen.update(&cmd.id, &form).await)
            }
        }
    }
}
