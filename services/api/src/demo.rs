use crate::infra::{build_careers_service, in_memory_service, sample_listings};
use clap::Args;
use hotel_careers::config::AppConfig;
use hotel_careers::error::AppError;
use hotel_careers::workflows::careers::applications::{
    DocumentKind, DraftField, SelectedFile, SubmissionError, WizardState, WizardStep,
    SUCCESS_MESSAGE,
};
use hotel_careers::workflows::careers::backend::InMemoryBackend;
use hotel_careers::workflows::careers::listings::ListingFilter;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct ListingsArgs {
    /// CSV export to read listings from instead of the configured source
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Case-insensitive match against title and department
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Exact department name ("All Departments" disables the filter)
    #[arg(long)]
    pub(crate) department: Option<String>,
    /// Exact location name ("All Locations" disables the filter)
    #[arg(long)]
    pub(crate) location: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CV to attach; a small generated PDF is used when omitted
    #[arg(long)]
    pub(crate) cv: Option<PathBuf>,
    /// Optional cover letter to attach
    #[arg(long)]
    pub(crate) cover_letter: Option<PathBuf>,
    /// Listing to apply for; omit for a general application
    #[arg(long)]
    pub(crate) job: Option<String>,
}

pub(crate) async fn run_listings(args: ListingsArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(csv) = args.csv {
        config.backend = None;
        config.listings_csv = Some(csv);
    }

    let service = build_careers_service(&config)?;
    let filter = ListingFilter::from_selection(
        args.search.as_deref(),
        args.department.as_deref(),
        args.location.as_deref(),
    );
    let page = match service.listings(&filter).await {
        Ok(page) => page,
        Err(err) => {
            println!("Listings unavailable: {err}");
            return Ok(());
        }
    };

    println!("{} (of {} open)", page.availability, page.total_active);
    for listing in &page.listings {
        println!(
            "- [{}] {} | {} | {} | {} | posted {}",
            listing.id,
            listing.title,
            listing.department,
            listing.location,
            listing.employment_type,
            listing.created_at.format("%Y-%m-%d")
        );
        if !listing.requirements.is_empty() {
            println!("    requires: {}", listing.requirements.join(", "));
        }
    }
    println!("Departments: {}", page.facets.departments.join(", "));
    println!("Locations: {}", page.facets.locations.join(", "));
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let backend = InMemoryBackend::with_listings(sample_listings()?);
    let service = in_memory_service(backend.clone());

    println!("Career application demo");
    let mut wizard = match service.open_application(args.job.as_deref()).await {
        Ok(wizard) => wizard,
        Err(err) => {
            println!("  Cannot open application: {err}");
            return Ok(());
        }
    };
    println!("- Applying for: {}", wizard.heading());

    fill_sample_applicant(&mut wizard);
    print_step(&wizard);

    let cv = match &args.cv {
        Some(path) => load_document(path)?,
        None => SelectedFile::new("sample-cv.pdf", "application/pdf", sample_pdf()),
    };
    let mut documents = vec![(DocumentKind::Cv, cv)];
    if let Some(path) = &args.cover_letter {
        documents.push((DocumentKind::CoverLetter, load_document(path)?));
    }

    for (kind, file) in documents {
        let name = file.name.clone();
        let size = file.size_label();
        match wizard.attach(kind, file) {
            Ok(()) => println!("  Attached {}: {} ({})", kind.label(), name, size),
            Err(err) => println!("  Rejected {}: {}", kind.label(), err),
        }
    }

    while wizard.advance() {
        print_step(&wizard);
    }
    if wizard.step() == WizardStep::Review {
        print_review(&wizard);
    } else {
        println!("  Wizard stopped at '{}'", wizard.step().title());
    }

    match wizard.submit(service.coordinator()).await {
        Ok(receipt) => {
            println!("\n{SUCCESS_MESSAGE}");
            if let Some(cv) = &receipt.cv {
                println!("  CV stored at {cv}");
            }
            if let Some(letter) = &receipt.cover_letter {
                println!("  Cover letter stored at {letter}");
            }
        }
        Err(SubmissionError::Incomplete(err)) => println!("\n  Not submitted: {err}"),
        Err(err) => {
            println!("\n  {}", err.user_message());
            for orphan in err.orphaned() {
                println!("  (left behind: {orphan})");
            }
        }
    }

    println!(
        "- Backend now holds {} document(s) and {} application record(s)",
        backend.objects().len(),
        backend.applications().len()
    );
    Ok(())
}

fn fill_sample_applicant(wizard: &mut WizardState) {
    let answers = [
        (DraftField::FirstName, "Deniz"),
        (DraftField::LastName, "Aydın"),
        (DraftField::Email, "deniz.aydin@example.com"),
        (DraftField::Phone, "+90 532 000 0000"),
        (DraftField::Nationality, "Turkish"),
        (DraftField::CurrentPosition, "Receptionist"),
        (DraftField::YearsExperience, "3"),
        (DraftField::PreviousEmployer, "Aegean Bay Hotel"),
        (DraftField::AvailableStartDate, "2025-05-01"),
    ];
    for (field, value) in answers {
        if let Err(err) = wizard.update_field(field, value) {
            println!("  Could not set {}: {err}", field.label());
        }
    }
}

fn print_step(wizard: &WizardState) {
    println!(
        "  Step {} of {}: {}",
        wizard.step().number(),
        WizardStep::ALL.len(),
        wizard.step().title()
    );
}

fn print_review(wizard: &WizardState) {
    match wizard.job() {
        Some(job) => println!("  Review your application for {}", job.title),
        None => println!("  Review your application"),
    }
    for section in wizard.review() {
        println!("    {}", section.title);
        for entry in &section.entries {
            println!("      {}: {}", entry.label, entry.value);
        }
    }
}

fn load_document(path: &Path) -> Result<SelectedFile, AppError> {
    let content = std::fs::read(path)?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    Ok(SelectedFile::new(name, mime_type, content))
}

fn sample_pdf() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF\n".to_vec()
}
