//! Static keyword tables used for rule-based tagging.
//!
//! Every table maps a tag (or a hint) to the lower-cased terms that trigger
//! it. Order matters only where noted: lookups that stop at the first hit
//! walk the table top to bottom.

/// `(tag, trigger terms)` pairs.
pub type KeywordTable = &'static [(&'static str, &'static [&'static str])];

/// Netloc fragment → tags. The first fragment contained in the netloc wins.
pub const DOMAIN_TAGS: KeywordTable = &[
    ("github.com", &["development", "coding", "programming", "opensource"]),
    ("stackoverflow.com", &["programming", "development", "coding", "help"]),
    ("youtube.com", &["video", "entertainment", "tutorial"]),
    ("medium.com", &["article", "blog", "reading"]),
    ("dev.to", &["programming", "development", "article"]),
    ("linkedin.com", &["professional", "networking", "career"]),
    ("twitter.com", &["social", "news"]),
    ("reddit.com", &["discussion", "community", "social"]),
    ("docs.google.com", &["document", "productivity", "work"]),
    ("figma.com", &["design", "ui", "ux"]),
    ("dribbble.com", &["design", "inspiration"]),
    ("behance.net", &["design", "portfolio", "creative"]),
    ("coursera.org", &["education", "learning", "course"]),
    ("udemy.com", &["education", "learning", "course"]),
    ("edx.org", &["education", "learning", "course"]),
    ("netflix.com", &["entertainment", "streaming", "video"]),
    ("spotify.com", &["music", "audio", "entertainment"]),
    ("amazon.com", &["shopping", "ecommerce"]),
    ("news.ycombinator.com", &["tech", "startup", "programming"]),
    ("techcrunch.com", &["tech", "startup", "news"]),
    ("wired.com", &["tech", "science", "news"]),
    ("nytimes.com", &["news", "journalism"]),
    ("bbc.com", &["news", "journalism"]),
    ("cnn.com", &["news", "journalism"]),
];

/// URL path fragment → tag.
pub const PATH_TAGS: &[(&str, &str)] = &[
    ("/blog", "article"),
    ("/article", "article"),
    ("/tutorial", "tutorial"),
    ("/guide", "tutorial"),
    ("/doc", "documentation"),
    ("/api", "documentation"),
    ("/video", "video"),
    ("/watch", "video"),
    ("/tool", "tool"),
    ("/app", "tool"),
];

/// What kind of resource the page is, plus frameworks and libraries.
pub const CONTENT_TAGS: KeywordTable = &[
    ("tutorial", &["how to", "step by step", "guide", "learn", "tutorial", "walkthrough", "beginner", "getting started", "introduction", "basics"]),
    ("reference", &["documentation", "docs", "api reference", "manual", "specification", "cheatsheet", "quick reference", "syntax"]),
    ("news", &["breaking", "announced", "announcement", "new version", "changelog", "what's new", "release notes"]),
    ("review", &["review", "comparison", "versus", "pros and cons", "evaluation", "assessment", "rating"]),
    ("tool", &["tool", "utility", "plugin", "extension", "software", "library", "framework", "package"]),
    ("course", &["course", "training", "certification", "bootcamp", "workshop", "masterclass", "lesson"]),
    ("article", &["article", "blog post", "insights", "thoughts", "opinion", "perspective"]),
    ("video", &["video", "youtube", "episode", "webinar", "screencast", "recording", "livestream"]),
    ("book", &["book", "ebook", "chapters", "free book"]),
    ("research", &["research", "study", "findings", "survey", "whitepaper", "case study", "paper"]),
    ("example", &["example", "demo", "sample", "code example", "showcase"]),
    ("list", &["awesome", "curated", "best of", "top 10", "resources"]),
    ("interview", &["interview", "q&a", "questions and answers"]),
    ("podcast", &["podcast", "listen", "audio"]),
    ("react", &["react", "reactjs", "jsx", "tsx", "usestate", "useeffect", "create-react-app", "gatsby"]),
    ("vue", &["vue", "vuejs", "vue.js", "composition api", "vuex", "pinia"]),
    ("angular", &["angular", "angularjs", "rxjs", "ionic"]),
    ("django", &["django", "django rest", "drf"]),
    ("laravel", &["laravel", "php framework", "eloquent", "artisan"]),
    ("express", &["express", "expressjs", "express.js"]),
    ("spring", &["spring boot", "spring framework", "dependency injection"]),
    ("flutter", &["flutter", "cross platform"]),
    ("tensorflow", &["tensorflow", "keras"]),
    ("pytorch", &["pytorch", "torch"]),
    ("fastapi", &["fastapi", "uvicorn", "pydantic"]),
    ("flask", &["flask", "microframework", "jinja2", "werkzeug"]),
    ("svelte", &["svelte", "sveltekit"]),
    ("nuxt", &["nuxt", "nuxtjs"]),
    ("nextjs", &["next.js", "nextjs"]),
    ("tailwind", &["tailwind", "tailwindcss", "utility-first"]),
    ("bootstrap", &["bootstrap"]),
    ("sass", &["sass", "scss", "css preprocessor"]),
    ("webpack", &["webpack", "module bundler"]),
    ("vite", &["vite"]),
];

/// Programming languages, databases and cloud platforms.
pub const TECHNOLOGY_TAGS: KeywordTable = &[
    ("python", &["python", "python3", "django", "flask", "fastapi", "pandas", "numpy", "scipy", "matplotlib", "jupyter", "pip", "conda", "virtualenv"]),
    ("javascript", &["javascript", "js", "ecmascript", "node", "nodejs", "node.js", "npm", "yarn", "es6", "babel", "eslint"]),
    ("typescript", &["typescript", "ts", "tsc", "type annotations"]),
    ("java", &["java", "openjdk", "spring boot", "maven", "gradle", "junit", "hibernate"]),
    ("csharp", &["c#", "csharp", ".net", "dotnet", "asp.net", "entity framework", "nuget"]),
    ("php", &["php", "laravel", "symfony", "wordpress", "drupal", "codeigniter"]),
    ("ruby", &["ruby", "rails", "ruby on rails", "rubygems", "rspec"]),
    ("go", &["golang", "go lang", "goroutine", "go mod", "gofmt"]),
    ("rust", &["rust", "rustlang", "cargo", "crates.io", "borrow checker", "rustc"]),
    ("swift", &["swift", "swiftui", "xcode", "cocoapods", "objective-c"]),
    ("kotlin", &["kotlin", "jetbrains", "coroutine"]),
    ("cpp", &["c++", "cpp", "cmake", "clang", "boost"]),
    ("c", &["c language", "c programming"]),
    ("scala", &["scala", "sbt", "akka", "play framework"]),
    ("dart", &["dart", "flutter"]),
    ("elixir", &["elixir", "phoenix", "erlang", "otp"]),
    ("haskell", &["haskell", "ghc", "cabal"]),
    ("clojure", &["clojure", "leiningen"]),
    ("mysql", &["mysql", "mariadb"]),
    ("postgresql", &["postgresql", "postgres", "psql"]),
    ("mongodb", &["mongodb", "mongo", "nosql"]),
    ("redis", &["redis", "in-memory"]),
    ("sqlite", &["sqlite", "embedded database"]),
    ("aws", &["aws", "amazon web services", "ec2", "s3", "lambda"]),
    ("azure", &["azure", "microsoft cloud"]),
    ("gcp", &["google cloud", "gcp", "firebase"]),
    ("docker", &["docker", "container", "containerization", "dockerfile"]),
    ("kubernetes", &["kubernetes", "k8s", "helm", "orchestration"]),
];

/// Development topics, broader concepts and industries.
pub const TOPIC_TAGS: KeywordTable = &[
    ("frontend", &["frontend", "front-end", "user interface", "client side"]),
    ("backend", &["backend", "back-end", "server side", "server-side"]),
    ("fullstack", &["fullstack", "full stack", "full-stack"]),
    ("mobile", &["mobile", "ios", "android", "app development"]),
    ("web", &["web development", "website", "web app"]),
    ("api", &["api", "rest", "graphql", "endpoint"]),
    ("database", &["database", "sql", "query", "schema"]),
    ("testing", &["testing", "unit test", "integration test", "test automation"]),
    ("deployment", &["deployment", "deploy", "production", "hosting"]),
    ("performance", &["performance", "optimization", "latency", "benchmark"]),
    ("security", &["security", "authentication", "authorization", "encryption", "vulnerability"]),
    ("machine-learning", &["machine learning", "ml", "artificial intelligence", "ai", "deep learning", "neural network"]),
    ("data-science", &["data science", "analytics", "visualization", "statistics"]),
    ("blockchain", &["blockchain", "cryptocurrency", "bitcoin", "ethereum"]),
    ("iot", &["internet of things", "iot", "sensor", "embedded"]),
    ("devops", &["devops", "ci/cd", "continuous integration", "infrastructure as code"]),
    ("open-source", &["open source", "open-source", "github", "contributing"]),
    ("finance", &["finance", "investment", "banking", "crypto", "trading", "stocks"]),
    ("healthcare", &["health", "medical", "doctor", "patient", "medicine", "therapy"]),
    ("education", &["education", "school", "university", "student", "teacher"]),
    ("marketing", &["marketing", "advertising", "brand", "campaign", "social media"]),
    ("business", &["business", "startup", "entrepreneur", "enterprise"]),
    ("science", &["science", "experiment", "discovery", "laboratory"]),
    ("travel", &["travel", "vacation", "trip", "tourism", "hotel", "flight"]),
    ("food", &["food", "recipe", "cooking", "restaurant", "cuisine", "meal"]),
    ("sports", &["sports", "championship", "tournament", "league"]),
    ("entertainment", &["movie", "music", "celebrity", "entertainment", "tv show"]),
];

/// Domain → extra words folded into a bookmark's keyword set.
pub const DOMAIN_HINTS: &[(&str, &str)] = &[
    ("github.com", "programming development code"),
    ("stackoverflow.com", "programming development help"),
    ("youtube.com", "video tutorial entertainment"),
    ("medium.com", "article blog reading"),
    ("linkedin.com", "professional networking"),
    ("twitter.com", "social news"),
    ("reddit.com", "discussion community"),
    ("dev.to", "programming development"),
    ("docs.google.com", "document productivity"),
    ("figma.com", "design ui ux"),
];

/// Tags of the first `DOMAIN_TAGS` entry whose key occurs in `netloc`.
pub fn domain_tags(netloc: &str) -> &'static [&'static str] {
    DOMAIN_TAGS
        .iter()
        .find(|(pattern, _)| netloc.contains(pattern))
        .map(|(_, tags)| *tags)
        .unwrap_or(&[])
}

/// Hint words for an exact (normalized) domain, empty when unknown.
pub fn domain_hint(domain: &str) -> &'static str {
    DOMAIN_HINTS
        .iter()
        .find(|(known, _)| *known == domain)
        .map(|(_, hint)| *hint)
        .unwrap_or("")
}
