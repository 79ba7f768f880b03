//! Interactive operation menu

use crate::commands;
use anyhow::Result;
use ds_pdf::LayoutConfig;
use inquire::{CustomType, InquireError, Select};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Collage,
    Extract,
    Merge,
}

impl Operation {
    const ALL: [Operation; 3] = [Operation::Collage, Operation::Extract, Operation::Merge];
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Collage => "1. Create a collage of PDF pages (1x2 collage)",
            Operation::Extract => "2. Extract pages from a PDF",
            Operation::Merge => "3. Merge multiple PDFs",
        };
        f.write_str(label)
    }
}

/// Run the menu once: pick an operation, its files, then execute it.
///
/// Cancelled prompts and failed operations are reported on stdout and
/// end the menu without an error.
pub async fn run() -> Result<()> {
    println!("Welcome to DS PDF App");

    let operation = match Select::new("Select an operation:", Operation::ALL.to_vec()).prompt() {
        Ok(operation) => operation,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            println!("No operation selected. Exiting.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match operation {
        Operation::Collage => collage().await,
        Operation::Extract => extract().await,
        Operation::Merge => merge().await,
    }
}

async fn collage() -> Result<()> {
    let Some(input) = picker::input_file("Select the input PDF for collage")? else {
        println!("No input file selected. Exiting.");
        return Ok(());
    };
    let Some(output) = picker::output_file("Save the collaged PDF")? else {
        println!("No output file selected. Exiting.");
        return Ok(());
    };

    match commands::collage_file(&input, &output, &LayoutConfig::default()).await {
        Ok(_) => println!("Collaged PDF created successfully at: {}", output.display()),
        Err(e) => println!("An error occurred while creating the collage: {:#}", e),
    }
    Ok(())
}

async fn extract() -> Result<()> {
    let Some(input) = picker::input_file("Select the PDF for extraction")? else {
        println!("No input file selected. Exiting.");
        return Ok(());
    };

    let Some(start) = page_number("Enter start page number:")? else {
        println!("Invalid page number input. Exiting.");
        return Ok(());
    };
    let Some(end) = page_number("Enter end page number:")? else {
        println!("Invalid page number input. Exiting.");
        return Ok(());
    };

    let Some(output) = picker::output_file("Save the extracted PDF")? else {
        println!("No output file selected. Exiting.");
        return Ok(());
    };

    match commands::extract_file(&input, &output, start, end).await {
        Ok(_) => println!("Extracted PDF created successfully at: {}", output.display()),
        Err(e) => println!("An error occurred while extracting pages: {:#}", e),
    }
    Ok(())
}

async fn merge() -> Result<()> {
    let inputs = picker::input_files("Select PDF files to merge")?;
    if inputs.is_empty() {
        println!("No PDF files selected. Exiting.");
        return Ok(());
    }
    let Some(output) = picker::output_file("Save the merged PDF")? else {
        println!("No output file selected. Exiting.");
        return Ok(());
    };

    match commands::merge_files(&inputs, &output).await {
        Ok(_) => println!("Merged PDF created successfully at: {}", output.display()),
        Err(e) => println!("An error occurred while merging PDFs: {:#}", e),
    }
    Ok(())
}

fn page_number(message: &str) -> Result<Option<u32>> {
    Ok(CustomType::<u32>::new(message)
        .with_error_message("Please enter a whole page number")
        .prompt_skippable()?)
}

/// Append `.pdf` when a chosen output path has no extension
fn with_pdf_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("pdf");
    }
    path
}

#[cfg(feature = "dialogs")]
mod picker {
    use super::with_pdf_extension;
    use anyhow::Result;
    use rfd::FileDialog;
    use std::path::PathBuf;

    fn pdf_dialog(title: &str) -> FileDialog {
        FileDialog::new()
            .set_title(title)
            .add_filter("PDF Files", &["pdf"])
    }

    pub fn input_file(title: &str) -> Result<Option<PathBuf>> {
        Ok(pdf_dialog(title).pick_file())
    }

    pub fn input_files(title: &str) -> Result<Vec<PathBuf>> {
        Ok(pdf_dialog(title).pick_files().unwrap_or_default())
    }

    pub fn output_file(title: &str) -> Result<Option<PathBuf>> {
        Ok(pdf_dialog(title).save_file().map(with_pdf_extension))
    }
}

#[cfg(not(feature = "dialogs"))]
mod picker {
    use super::with_pdf_extension;
    use anyhow::Result;
    use inquire::Text;
    use std::path::PathBuf;

    fn path_prompt(title: &str) -> Result<Option<String>> {
        let answer = Text::new(&format!("{}:", title)).prompt_skippable()?;
        Ok(answer
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }

    pub fn input_file(title: &str) -> Result<Option<PathBuf>> {
        Ok(path_prompt(title)?.map(PathBuf::from))
    }

    /// One path per prompt; an empty answer ends the list
    pub fn input_files(title: &str) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        loop {
            let prompt = format!("{} (#{}, empty to finish)", title, paths.len() + 1);
            match path_prompt(&prompt)? {
                Some(path) => paths.push(PathBuf::from(path)),
                None => break,
            }
        }
        Ok(paths)
    }

    pub fn output_file(title: &str) -> Result<Option<PathBuf>> {
        Ok(path_prompt(title)?.map(|p| with_pdf_extension(PathBuf::from(p))))
    }
}
