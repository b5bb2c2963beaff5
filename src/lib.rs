mod cli;
pub mod interactive;
pub mod render;

use course_navigator::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
