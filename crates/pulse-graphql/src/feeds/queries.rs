//! GraphQL documents for each feed.

pub const MEMBERS: &str = r#"
query($org: String!, $first: Int!, $cursor: String) {
  organization(login: $org) {
    membersWithRole(first: $first, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes { login }
    }
  }
}
"#;

pub const REPOSITORIES: &str = r#"
query($org: String!, $first: Int!, $cursor: String) {
  organization(login: $org) {
    repositories(first: $first, isFork: false, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes { name isFork }
    }
  }
}
"#;

pub const BRANCHES: &str = r#"
query($org: String!, $repo: String!, $first: Int!, $cursor: String) {
  repository(owner: $org, name: $repo) {
    refs(refPrefix: "refs/heads/", first: $first, after: $cursor) {
      pageInfo { hasNextPage endCursor }
      nodes { name }
    }
  }
}
"#;

pub const COMMITS: &str = r#"
query($org: String!, $repo: String!, $branch: String!, $first: Int!, $cursor: String) {
  repository(owner: $org, name: $repo) {
    ref(qualifiedName: $branch) {
      target {
        ... on Commit {
          history(first: $first, after: $cursor) {
            pageInfo { hasNextPage endCursor }
            edges {
              node {
                committedDate
                author { user { login } }
              }
            }
          }
        }
      }
    }
  }
}
"#;

pub const ISSUES: &str = r#"
query($org: String!, $repo: String!, $first: Int!, $cursor: String) {
  repository(owner: $org, name: $repo) {
    issues(first: $first, after: $cursor, orderBy: {field: CREATED_AT, direction: DESC}) {
      pageInfo { hasNextPage endCursor }
      nodes {
        createdAt
        author { login }
      }
    }
  }
}
"#;

pub const PULL_REQUESTS: &str = r#"
query($org: String!, $repo: String!, $first: Int!, $cursor: String) {
  repository(owner: $org, name: $repo) {
    pullRequests(first: $first, after: $cursor, orderBy: {field: CREATED_AT, direction: DESC}) {
      pageInfo { hasNextPage endCursor }
      nodes {
        createdAt
        author { login }
      }
    }
  }
}
"#;
