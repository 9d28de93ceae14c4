//! Canned Jira payloads for tests
//!
//! JSON fixtures are returned as [`serde_json::Value`] so tests can hand them
//! straight to wiremock's `set_body_json`. The Atom fixtures are raw strings
//! because the decoder under test must see the exact bytes.

use serde_json::{Value, json};

/// Inner markup of the first entry's `author` element in [`ACTIVITY_FEED`]
pub const FIRST_AUTHOR_INNER: &str = r#"
      <name>Bob Builder</name>
      <email>bob@example.com</email>
      <uri>https://jira.example.com/secure/ViewProfile.jspa?name=bob</uri>
      <link rel="photo" href="https://jira.example.com/secure/useravatar?ownerId=bob"/>
      <usr:username>bob</usr:username>
    "#;

/// Inner markup of the second entry's `author` element in [`ACTIVITY_FEED`]
pub const SECOND_AUTHOR_INNER: &str =
  r#"<name>Alice &amp; Co</name><uri>https://jira.example.com/secure/ViewProfile.jspa?name=alice</uri><usr:username>alice</usr:username>"#;

/// Atom feed with two entries, shaped like a Jira activity stream
pub const ACTIVITY_FEED: &str = concat!(
  r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:activity="http://activitystrea.ms/spec/1.0/" xmlns:usr="http://streams.atlassian.com/syndication/username/1.0">
  <id>https://jira.example.com/activity</id>
  <title type="text">Activity Stream</title>
  <link rel="self" href="https://jira.example.com/activity?streams=user+IS+bob"/>
  <link rel="next" href="https://jira.example.com/activity?streams=user+IS+bob&amp;maxResults=10&amp;before=1682928000000"/>
  <updated>2023-05-01T10:00:00.000Z</updated>
  <entry>
    <id>urn:uuid:6c5d4e5e-0001</id>
    <title type="html">&lt;a href="https://jira.example.com/secure/ViewProfile.jspa?name=bob"&gt;Bob Builder&lt;/a&gt; created PROJ-1</title>
    <author>"#,
  r#"
      <name>Bob Builder</name>
      <email>bob@example.com</email>
      <uri>https://jira.example.com/secure/ViewProfile.jspa?name=bob</uri>
      <link rel="photo" href="https://jira.example.com/secure/useravatar?ownerId=bob"/>
      <usr:username>bob</usr:username>
    "#,
  r#"</author>
    <link rel="alternate" href="https://jira.example.com/browse/PROJ-1"/>
    <updated>2023-05-01T09:30:00.000Z</updated>
    <summary type="html">Created &lt;b&gt;PROJ-1&lt;/b&gt;</summary>
    <category term="created"/>
    <activity:verb>http://activitystrea.ms/schema/1.0/post</activity:verb>
  </entry>
  <entry>
    <id>urn:uuid:6c5d4e5e-0002</id>
    <title type="text">Alice commented on PROJ-1</title>
    <author>"#,
  r#"<name>Alice &amp; Co</name><uri>https://jira.example.com/secure/ViewProfile.jspa?name=alice</uri><usr:username>alice</usr:username>"#,
  r#"</author>
    <link href="https://jira.example.com/browse/PROJ-1?focusedCommentId=10"/>
    <updated>2023-05-01T08:15:00+02:00</updated>
    <summary>Looks good to me</summary>
    <category term="comment"></category>
  </entry>
</feed>
"#
);

/// A JSON issue as returned by `GET /issue/{id}`
pub fn issue_json(key: &str, created: &str) -> Value {
  json!({
      "id": "10000",
      "key": key,
      "self": format!("https://jira.example.com/rest/api/2/issue/{key}"),
      "expand": "renderedFields,names,schema",
      "fields": {
          "summary": "Test issue",
          "description": "This is a test issue",
          "created": created,
          "issuetype": {
              "self": "https://jira.example.com/rest/api/2/issuetype/1",
              "id": "1",
              "description": "A problem which impairs or prevents the functions of the product.",
              "iconUrl": "https://jira.example.com/images/icons/bug.png",
              "name": "Bug",
              "subtask": false
          },
          "project": {
              "self": "https://jira.example.com/rest/api/2/project/10000",
              "id": "10000",
              "key": "PROJ",
              "name": "Project",
              "avatarUrls": {
                  "48x48": "https://jira.example.com/secure/projectavatar?pid=10000"
              }
          },
          "reporter": user_json("alice"),
          "assignee": user_json("bob")
      }
  })
}

/// A JSON user as returned by `GET /user?username=`
pub fn user_json(name: &str) -> Value {
  json!({
      "self": format!("https://jira.example.com/rest/api/2/user?username={name}"),
      "name": name,
      "emailAddress": format!("{name}@example.com"),
      "displayName": format!("User {name}"),
      "active": true,
      "timeZone": "Europe/Paris",
      "avatarUrls": {
          "16x16": format!("https://jira.example.com/secure/useravatar?size=xsmall&ownerId={name}")
      },
      "expand": "groups"
  })
}

/// A JSON search result page as returned by `GET /search`
pub fn search_json(total: u32, start_at: u32, max_results: u32, issues: Vec<Value>) -> Value {
  json!({
      "expand": "names,schema",
      "startAt": start_at,
      "maxResults": max_results,
      "total": total,
      "issues": issues
  })
}
