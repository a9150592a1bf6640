//! Built-in seed documents used to pre-populate new documents.
//!
//! Templates are read-only: the store copies their narrative sections and
//! requirements at document-creation time and never writes back.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Category, Document, Priority, Requirement, Status};

fn template_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn seed_requirement(
    id: &str,
    number: &str,
    text: &str,
    category: Category,
    priority: Priority,
) -> Requirement {
    Requirement {
        id: id.to_string(),
        number: number.to_string(),
        text: text.to_string(),
        category,
        priority,
        status: Status::Draft,
        dependencies: Vec::new(),
        comments: Vec::new(),
    }
}

/// Returns the ordered template catalog
pub fn builtin_templates() -> Vec<Document> {
    vec![web_app_template(), rest_api_template()]
}

fn web_app_template() -> Document {
    let content = "\
# Web Application Requirements

## Overview

This document outlines the requirements for building a modern web application using AI agents.

## Project Goals

- Build a responsive web application
- Implement user authentication
- Create a modern UI/UX
- Ensure scalability and performance

## Technical Stack

- Frontend: React/Next.js
- Backend: Node.js/Express or Python/FastAPI
- Database: PostgreSQL or MongoDB
- Deployment: Vercel/Netlify or AWS
";

    Document {
        id: "web-app-template".to_string(),
        name: "Web Application Template".to_string(),
        intent: String::new(),
        context: String::new(),
        content: content.to_string(),
        requirements: vec![
            seed_requirement(
                "req-1",
                "F-1",
                "The application shall have user authentication with email/password and OAuth support",
                Category::Functional,
                Priority::High,
            ),
            seed_requirement(
                "req-2",
                "F-2",
                "The application shall be responsive and work on mobile, tablet, and desktop devices",
                Category::Functional,
                Priority::High,
            ),
            seed_requirement(
                "req-3",
                "NF-1",
                "The application shall load initial content within 2 seconds on a 3G connection",
                Category::NonFunctional,
                Priority::High,
            ),
            seed_requirement(
                "req-4",
                "C-1",
                "The application shall comply with GDPR and CCPA privacy regulations",
                Category::Constraint,
                Priority::High,
            ),
        ],
        created_at: template_timestamp(),
        updated_at: template_timestamp(),
        version: 1,
    }
}

fn rest_api_template() -> Document {
    let content = "\
# REST API Requirements

## Overview

This document outlines the requirements for building a RESTful API using AI agents.

## API Design Principles

- RESTful conventions
- Versioning strategy
- Authentication and authorization
- Rate limiting
- Comprehensive error handling

## Technical Requirements

- OpenAPI/Swagger documentation
- Request/response validation
- Logging and monitoring
- Security best practices
";

    Document {
        id: "api-template".to_string(),
        name: "REST API Template".to_string(),
        intent: String::new(),
        context: String::new(),
        content: content.to_string(),
        requirements: vec![
            seed_requirement(
                "req-1",
                "F-1",
                "The API shall implement RESTful conventions (GET, POST, PUT, DELETE, PATCH)",
                Category::Functional,
                Priority::High,
            ),
            seed_requirement(
                "req-2",
                "F-2",
                "The API shall provide OpenAPI/Swagger documentation",
                Category::Functional,
                Priority::High,
            ),
            seed_requirement(
                "req-3",
                "F-3",
                "The API shall implement authentication using JWT tokens",
                Category::Functional,
                Priority::High,
            ),
            seed_requirement(
                "req-4",
                "NF-1",
                "The API shall handle at least 1000 requests per second",
                Category::NonFunctional,
                Priority::Medium,
            ),
            seed_requirement(
                "req-5",
                "NF-2",
                "The API shall have 99.9% uptime",
                Category::NonFunctional,
                Priority::High,
            ),
            seed_requirement(
                "req-6",
                "C-1",
                "The API shall implement rate limiting (100 requests per minute per user)",
                Category::Constraint,
                Priority::Medium,
            ),
        ],
        created_at: template_timestamp(),
        updated_at: template_timestamp(),
        version: 1,
    }
}
